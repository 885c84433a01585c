use std::sync::Arc;
use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream;
use futures::StreamExt;

use crate::domain::models::FragmentStream;
use crate::domain::models::ModelVariant;
use crate::domain::models::PromptContext;
use crate::domain::models::Provider;

/// Replays a fixed set of fragments, optionally failing, and records every
/// prompt it was asked to complete.
pub struct ScriptedProvider {
    fragments: Vec<String>,
    stream_failure: Option<String>,
    request_failure: Option<String>,
    prompts: Arc<Mutex<Vec<PromptContext>>>,
}

impl ScriptedProvider {
    pub fn new(fragments: &[&str]) -> ScriptedProvider {
        return ScriptedProvider {
            fragments: fragments.iter().map(|e| return e.to_string()).collect(),
            stream_failure: None,
            request_failure: None,
            prompts: Arc::new(Mutex::new(vec![])),
        };
    }

    pub fn failing_after(fragments: &[&str], error: &str) -> ScriptedProvider {
        let mut provider = ScriptedProvider::new(fragments);
        provider.stream_failure = Some(error.to_string());
        return provider;
    }

    pub fn failing_request(error: &str) -> ScriptedProvider {
        let mut provider = ScriptedProvider::new(&[]);
        provider.request_failure = Some(error.to_string());
        return provider;
    }

    pub fn prompts(&self) -> Arc<Mutex<Vec<PromptContext>>> {
        return self.prompts.clone();
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn model(&self) -> ModelVariant {
        return ModelVariant::Gpt4o;
    }

    #[allow(clippy::implicit_return)]
    async fn stream_complete(&self, prompt: &PromptContext) -> Result<FragmentStream> {
        self.prompts.lock().unwrap().push(prompt.clone());
        if let Some(err) = &self.request_failure {
            bail!(err.to_string());
        }

        let mut items: Vec<Result<String>> = self
            .fragments
            .iter()
            .map(|fragment| return Ok(fragment.to_string()))
            .collect();
        if let Some(err) = &self.stream_failure {
            items.push(Err(anyhow!(err.to_string())));
        }

        return Ok(stream::iter(items).boxed());
    }
}
