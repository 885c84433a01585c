#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;

use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumString;
use strum::EnumVariantNames;

use super::ChatError;
use super::PromptContext;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    EnumIter,
    EnumString,
    EnumVariantNames,
    strum::Display,
)]
pub enum ModelVariant {
    #[default]
    #[serde(rename = "gpt-4o")]
    #[strum(serialize = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4-turbo")]
    #[strum(serialize = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl ModelVariant {
    pub fn parse(text: &str) -> Option<ModelVariant> {
        return ModelVariant::from_str(text.trim()).ok();
    }
}

pub const MISSING_TOKEN_NOTICE: &str =
    "Please set an OpenAI API key with `/key TOKEN`, `--openai-token` or GLIMPSE_OPENAI_TOKEN.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    pub token: String,
    pub model: ModelVariant,
    pub streaming: bool,
    pub url: String,
}

impl ProviderConfig {
    pub fn from_config() -> ProviderConfig {
        return ProviderConfig {
            token: Config::get(ConfigKey::OpenAiToken),
            model: ModelVariant::parse(&Config::get(ConfigKey::Model)).unwrap_or_default(),
            streaming: Config::get(ConfigKey::Streaming) != "false",
            url: Config::get(ConfigKey::OpenAiURL),
        };
    }

    /// A provider is only usable with a credential and somewhere to send it.
    pub fn validate(&self) -> Result<(), ChatError> {
        if self.token.trim().is_empty() {
            return Err(ChatError::Config(MISSING_TOKEN_NOTICE.to_string()));
        }
        if self.url.trim().is_empty() {
            return Err(ChatError::Config("OpenAI URL is not defined.".to_string()));
        }

        return Ok(());
    }
}

/// Lazy, finite sequence of response text fragments. It cannot be restarted,
/// a retry is a new request.
pub type FragmentStream = BoxStream<'static, Result<String>>;

#[async_trait]
pub trait Provider {
    fn model(&self) -> ModelVariant;

    /// Sends the prompt and returns the response as a stream of text
    /// fragments. The stream ends once the provider signals completion, and
    /// yields an error if the response breaks off before that.
    async fn stream_complete(&self, prompt: &PromptContext) -> Result<FragmentStream>;
}

pub type ProviderBox = Box<dyn Provider + Send + Sync>;
