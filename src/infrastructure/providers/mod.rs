#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod openai;
#[cfg(test)]
pub mod scripted;

use crate::domain::models::ChatError;
use crate::domain::models::ProviderBox;
use crate::domain::models::ProviderConfig;

pub struct ProviderManager {}

impl ProviderManager {
    /// Builds the provider for a config. Without a credential there is no
    /// provider and chatting stays disabled.
    pub fn get(config: &ProviderConfig) -> Result<ProviderBox, ChatError> {
        config.validate()?;
        tracing::debug!(model = %config.model, url = %config.url, "Using OpenAI provider");

        return Ok(Box::new(openai::OpenAI::new(config)));
    }
}
