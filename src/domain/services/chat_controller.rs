#[cfg(test)]
#[path = "chat_controller_test.rs"]
mod tests;

use chrono::Utc;
use futures::StreamExt;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::MessageCodec;
use super::PromptAssembler;
use super::SessionStore;
use crate::domain::models::ChatError;
use crate::domain::models::ChatInput;
use crate::domain::models::ChatState;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::ModelVariant;
use crate::domain::models::PromptContext;
use crate::domain::models::ProviderBox;
use crate::domain::models::ProviderRun;
use crate::domain::models::TracerBox;
use crate::domain::models::MISSING_TOKEN_NOTICE;

/// Consumes the provider's fragments one at a time, forwarding each to the
/// renderer as it arrives, and returns the full text once the stream ends.
async fn stream_fragments(
    provider: &ProviderBox,
    prompt: &PromptContext,
    state: &mut ChatState,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<String, ChatError> {
    let mut stream = provider.stream_complete(prompt).await.map_err(|err| {
        tracing::error!(error = ?err, "Completion request failed");
        return ChatError::Provider(format!("{err:#}"));
    })?;
    *state = ChatState::Streaming;

    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        let fragment = fragment.map_err(|err| {
            tracing::error!(error = ?err, received = text.len(), "Completion stream failed");
            return ChatError::Provider(format!("{err:#}"));
        })?;

        text += &fragment;
        tx.send(Event::ChatFragment(fragment))
            .map_err(|_| return ChatError::Disconnected)?;
    }

    return Ok(text);
}

pub struct ChatController {
    assembler: PromptAssembler,
    provider: Option<ProviderBox>,
    tracer: Option<TracerBox>,
    state: ChatState,
}

impl ChatController {
    pub fn new(
        assembler: PromptAssembler,
        provider: Option<ProviderBox>,
        tracer: Option<TracerBox>,
    ) -> ChatController {
        let mut state = ChatState::Disabled;
        if provider.is_some() {
            state = ChatState::Idle;
        }

        return ChatController {
            assembler,
            provider,
            tracer,
            state,
        };
    }

    pub fn state(&self) -> ChatState {
        return self.state;
    }

    pub fn model(&self) -> Option<ModelVariant> {
        return self.provider.as_ref().map(|provider| return provider.model());
    }

    /// Swaps the provider, enabling or disabling the controller to match.
    pub fn set_provider(&mut self, provider: Option<ProviderBox>) {
        if provider.is_none() {
            self.state = ChatState::Disabled;
        } else if self.state == ChatState::Disabled {
            self.state = ChatState::Idle;
        }

        self.provider = provider;
    }

    /// Runs one exchange: the human message is rendered straight away, the
    /// reply is streamed to the renderer, and only once the stream completes
    /// are both messages written to the session. A failed exchange leaves the
    /// session untouched.
    pub async fn submit(
        &mut self,
        store: &SessionStore,
        session_id: &str,
        input: ChatInput,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Result<(), ChatError> {
        let provider = match self.provider.as_ref() {
            Some(provider) => provider,
            None => return Err(ChatError::Config(MISSING_TOKEN_NOTICE.to_string())),
        };
        if self.state.is_busy() {
            return Err(ChatError::Busy);
        }

        let message = MessageCodec::encode_human_input(input);
        self.state = ChatState::Sending;
        if tx.send(Event::ChatHumanMessage(message.clone())).is_err() {
            self.state = ChatState::Idle;
            return Err(ChatError::Disconnected);
        }

        let prompt = self.assembler.build(&store.list(session_id), &message);
        let start_time = Utc::now();
        let res = stream_fragments(provider, &prompt, &mut self.state, tx).await;
        let end_time = Utc::now();

        let run = ProviderRun {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            model: provider.model(),
            prompt,
            output: res.as_ref().ok().cloned(),
            error: res.as_ref().err().map(|err| return err.to_string()),
            start_time,
            end_time,
        };

        let outcome = match res {
            Ok(text) => {
                let reply = Message::assistant(&text);
                store.extend(session_id, vec![message, reply.clone()]);
                self.state = ChatState::Settled;
                tracing::debug!(session_id = session_id, len = text.len(), "Exchange settled");

                tx.send(Event::ChatSettled(reply))
                    .map_err(|_| return ChatError::Disconnected)
            }
            Err(err) => {
                self.state = ChatState::Idle;
                Err(err)
            }
        };

        if let Some(tracer) = self.tracer.as_ref() {
            if let Err(err) = tracer.report(&run).await {
                tracing::warn!(error = ?err, run_id = %run.id, "Failed to report provider run");
            }
        }

        return outcome;
    }
}
