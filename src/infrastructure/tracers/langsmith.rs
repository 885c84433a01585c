#[cfg(test)]
#[path = "langsmith_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::domain::models::Message;
use crate::domain::models::ProviderRun;
use crate::domain::models::Tracer;
use crate::domain::models::TracingConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RunInputs<'a> {
    system: &'a str,
    messages: Vec<&'a Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RunGeneration<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RunOutputs<'a> {
    generations: Vec<RunGeneration<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RunMetadata<'a> {
    session_id: &'a str,
    ls_provider: &'a str,
    ls_model_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RunExtra<'a> {
    metadata: RunMetadata<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RunRequest<'a> {
    id: &'a str,
    name: &'a str,
    run_type: &'a str,
    start_time: String,
    end_time: String,
    inputs: RunInputs<'a>,
    outputs: Option<RunOutputs<'a>>,
    error: Option<&'a str>,
    session_name: &'a str,
    extra: RunExtra<'a>,
}

impl<'a> RunRequest<'a> {
    fn new(run: &'a ProviderRun, project: &'a str) -> RunRequest<'a> {
        return RunRequest {
            id: &run.id,
            name: "ChatOpenAI",
            run_type: "llm",
            start_time: run.start_time.to_rfc3339(),
            end_time: run.end_time.to_rfc3339(),
            inputs: RunInputs {
                system: &run.prompt.system,
                messages: run.prompt.messages().collect(),
            },
            outputs: run.output.as_ref().map(|text| {
                return RunOutputs {
                    generations: vec![RunGeneration { text }],
                };
            }),
            error: run.error.as_deref(),
            session_name: project,
            extra: RunExtra {
                metadata: RunMetadata {
                    session_id: &run.session_id,
                    ls_provider: "openai",
                    ls_model_name: run.model.to_string(),
                },
            },
        };
    }
}

/// Reports provider runs to LangSmith.
pub struct LangSmith {
    client: reqwest::Client,
    project: String,
    token: String,
    url: String,
}

impl LangSmith {
    pub fn new(config: &TracingConfig) -> LangSmith {
        return LangSmith {
            client: reqwest::Client::new(),
            project: config.project.to_string(),
            token: config.token.to_string(),
            url: config.url.trim_end_matches('/').to_string(),
        };
    }
}

#[async_trait]
impl Tracer for LangSmith {
    #[allow(clippy::implicit_return)]
    async fn report(&self, run: &ProviderRun) -> Result<()> {
        let req = RunRequest::new(run, &self.project);
        tracing::debug!(run_id = %run.id, project = %self.project, "Reporting run to LangSmith");

        let res = self
            .client
            .post(format!("{url}/runs", url = self.url))
            .header("x-api-key", &self.token)
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            bail!("LangSmith rejected run {}, status {status}: {body}", run.id);
        }

        return Ok(());
    }
}
