use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Config(String),

    #[error("The provider failed with the following error: {0}")]
    Provider(String),

    #[error("{0}")]
    Input(String),

    #[error("A response is still streaming. Wait for it to finish before sending another message.")]
    Busy,

    #[error("The chat window stopped listening for events")]
    Disconnected,
}
