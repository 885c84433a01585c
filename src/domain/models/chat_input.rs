#[cfg(test)]
#[path = "chat_input_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Raw submission from the input widget. Missing or null fields fall back to
/// empty values rather than failing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    return Ok(value.unwrap_or_default());
}

impl ChatInput {
    pub fn new(text: &str, images: Vec<String>) -> ChatInput {
        return ChatInput {
            text: text.to_string(),
            images,
        };
    }

    pub fn is_empty(&self) -> bool {
        return self.text.trim().is_empty() && self.images.is_empty();
    }
}
