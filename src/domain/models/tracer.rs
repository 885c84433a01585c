use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::ModelVariant;
use super::PromptContext;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracingConfig {
    pub token: String,
    pub project: String,
    pub url: String,
}

impl TracingConfig {
    pub fn from_config() -> TracingConfig {
        return TracingConfig {
            token: Config::get(ConfigKey::LangSmithToken),
            project: Config::get(ConfigKey::LangSmithProject),
            url: Config::get(ConfigKey::LangSmithURL),
        };
    }

    /// Reporting is only switched on when both a key and a project are set.
    pub fn is_enabled(&self) -> bool {
        return !self.token.trim().is_empty() && !self.project.trim().is_empty();
    }
}

/// A single provider call, as handed to a tracer once it has finished.
#[derive(Clone, Debug)]
pub struct ProviderRun {
    pub id: String,
    pub session_id: String,
    pub model: ModelVariant,
    pub prompt: PromptContext,
    pub output: Option<String>,
    pub error: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[async_trait]
pub trait Tracer {
    async fn report(&self, run: &ProviderRun) -> Result<()>;
}

pub type TracerBox = Box<dyn Tracer + Send + Sync>;
