#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream;
use futures::stream::TryStreamExt;
use futures::StreamExt;
use serde::Deserialize;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::domain::models::ContentPart;
use crate::domain::models::FragmentStream;
use crate::domain::models::Message;
use crate::domain::models::ModelVariant;
use crate::domain::models::PromptContext;
use crate::domain::models::Provider;
use crate::domain::models::ProviderConfig;
use crate::domain::models::Role;

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ImageUrlRequest {
    url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPartRequest {
    Text { text: String },
    ImageUrl { image_url: ImageUrlRequest },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum MessageContentRequest {
    Text(String),
    Parts(Vec<ContentPartRequest>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: MessageContentRequest,
}

#[derive(Debug, Clone, Serialize)]
struct CompletionRequest {
    model: ModelVariant,
    messages: Vec<MessageRequest>,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionDeltaResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    #[serde(default)]
    delta: CompletionDeltaResponse,
    #[serde(default)]
    message: CompletionDeltaResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

#[derive(Debug, PartialEq, Eq)]
enum StreamLine {
    Fragment(String),
    Done,
    Skip,
}

impl From<&Message> for MessageRequest {
    fn from(message: &Message) -> MessageRequest {
        match message.role() {
            Role::Human => {
                let parts = message
                    .content()
                    .iter()
                    .map(|part| {
                        match part {
                            ContentPart::Text { text } => {
                                return ContentPartRequest::Text {
                                    text: text.to_string(),
                                };
                            }
                            ContentPart::Image { url } => {
                                return ContentPartRequest::ImageUrl {
                                    image_url: ImageUrlRequest {
                                        url: url.to_string(),
                                    },
                                };
                            }
                        }
                    })
                    .collect();

                return MessageRequest {
                    role: "user".to_string(),
                    content: MessageContentRequest::Parts(parts),
                };
            }
            Role::Assistant => {
                return MessageRequest {
                    role: "assistant".to_string(),
                    content: MessageContentRequest::Text(message.text()),
                };
            }
        }
    }
}

fn to_messages(prompt: &PromptContext) -> Vec<MessageRequest> {
    let mut messages = vec![MessageRequest {
        role: "system".to_string(),
        content: MessageContentRequest::Text(prompt.system.to_string()),
    }];
    messages.extend(prompt.messages().map(MessageRequest::from));

    return messages;
}

/// Parses a single line of the event stream. Blank lines, comments and
/// chunks without content are skipped.
fn parse_line(line: &str) -> Result<StreamLine> {
    let line = line.trim();
    let data = match line.strip_prefix("data:") {
        Some(data) => data.trim(),
        None => return Ok(StreamLine::Skip),
    };

    if data == "[DONE]" {
        return Ok(StreamLine::Done);
    }
    if data.is_empty() {
        return Ok(StreamLine::Skip);
    }

    let res: CompletionResponse = serde_json::from_str(data)?;
    tracing::debug!(body = ?res, "Completion response");

    let content = res
        .choices
        .into_iter()
        .next()
        .and_then(|choice| return choice.delta.content)
        .unwrap_or_default();
    if content.is_empty() {
        return Ok(StreamLine::Skip);
    }

    return Ok(StreamLine::Fragment(content));
}

pub struct OpenAI {
    client: reqwest::Client,
    model: ModelVariant,
    streaming: bool,
    token: String,
    url: String,
}

impl OpenAI {
    pub fn new(config: &ProviderConfig) -> OpenAI {
        return OpenAI {
            client: reqwest::Client::new(),
            model: config.model,
            streaming: config.streaming,
            token: config.token.to_string(),
            url: config.url.trim_end_matches('/').to_string(),
        };
    }

    async fn send(&self, prompt: &PromptContext) -> Result<reqwest::Response> {
        let req = CompletionRequest {
            model: self.model,
            messages: to_messages(prompt),
            stream: self.streaming,
        };
        tracing::debug!(
            model = %self.model,
            messages = req.messages.len(),
            stream = self.streaming,
            "Completion request"
        );

        let res = self
            .client
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!(
                status = status,
                body = %body,
                "Failed to make completion request to OpenAI"
            );
            bail!("Failed to make completion request to OpenAI, status {status}: {body}");
        }

        return Ok(res);
    }
}

#[async_trait]
impl Provider for OpenAI {
    fn model(&self) -> ModelVariant {
        return self.model;
    }

    #[allow(clippy::implicit_return)]
    async fn stream_complete(&self, prompt: &PromptContext) -> Result<FragmentStream> {
        let res = self.send(prompt).await?;

        if !self.streaming {
            let body = res.json::<CompletionResponse>().await?;
            tracing::debug!(body = ?body, "Completion response");
            let text = body
                .choices
                .into_iter()
                .next()
                .and_then(|choice| return choice.message.content)
                .ok_or_else(|| return anyhow!("OpenAI returned no completion choices"))?;

            return Ok(stream::iter(vec![Ok(text)]).boxed());
        }

        let lines = StreamReader::new(res.bytes_stream().map_err(convert_err)).lines();
        let fragments = stream::unfold((lines, false), |(mut lines, finished)| {
            return async move {
                if finished {
                    return None;
                }

                loop {
                    let line = match lines.next_line().await {
                        Ok(Some(line)) => line,
                        Ok(None) => {
                            return Some((
                                Err(anyhow!("OpenAI closed the stream before it completed")),
                                (lines, true),
                            ));
                        }
                        Err(err) => return Some((Err(err.into()), (lines, true))),
                    };

                    match parse_line(&line) {
                        Ok(StreamLine::Skip) => continue,
                        Ok(StreamLine::Done) => return None,
                        Ok(StreamLine::Fragment(text)) => return Some((Ok(text), (lines, false))),
                        Err(err) => return Some((Err(err), (lines, true))),
                    }
                }
            };
        });

        return Ok(fragments.boxed());
    }
}
