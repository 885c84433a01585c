use super::ChatInput;

pub enum Action {
    ChatSubmit(ChatInput),
    ModelSet(String),
    SessionReset(),
    SessionShow(),
    TokenSet(String),
}
