use super::Message;

/// Everything sent to the provider for one request. Built per request and
/// dropped once the exchange finishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptContext {
    pub system: String,
    pub history: Vec<Message>,
    pub input: Message,
}

impl PromptContext {
    /// Prior history followed by the new input, excluding the system
    /// instruction.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        return self.history.iter().chain(std::iter::once(&self.input));
    }
}
