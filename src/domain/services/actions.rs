#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use strum::VariantNames;
use tokio::sync::mpsc;

use super::ChatController;
use super::SessionLifecycle;
use super::SessionStore;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatError;
use crate::domain::models::ChatInput;
use crate::domain::models::Entry;
use crate::domain::models::EntryType;
use crate::domain::models::Event;
use crate::domain::models::ModelVariant;
use crate::domain::models::ProviderConfig;
use crate::infrastructure::providers::ProviderManager;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /image (/i) [URL_OR_PATH] - Attaches an image to your next message. Accepts http(s) URLs, data URIs and local png, jpg, gif or webp files.
- /images - Lists the images attached to your next message.
- /detach (/d) - Drops all images attached to your next message.
- /clear - Clears the conversation history and starts a new session.
- /session (/s) - Shows the current session id.
- /model (/m) [MODEL_NAME] - Switches the model. Available models are gpt-4o and gpt-4-turbo.
- /key [TOKEN] - Sets the OpenAI API key. An empty key disables chatting.
- /quit /exit (/q) - Exit Glimpse.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- ALT+Enter - New line
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

/// Background task that owns the chat session. Actions from the UI are
/// handled one at a time, so a reset sent during a stream waits for the
/// exchange to finish.
pub struct ActionsService {
    controller: ChatController,
    lifecycle: SessionLifecycle,
    provider_config: ProviderConfig,
    store: SessionStore,
    tx: mpsc::UnboundedSender<Event>,
}

impl ActionsService {
    pub fn new(
        controller: ChatController,
        provider_config: ProviderConfig,
        tx: mpsc::UnboundedSender<Event>,
    ) -> ActionsService {
        return ActionsService {
            controller,
            lifecycle: SessionLifecycle::default(),
            provider_config,
            store: SessionStore::default(),
            tx,
        };
    }

    pub async fn start(&mut self, rx: &mut mpsc::UnboundedReceiver<Action>) -> Result<()> {
        let session_id = self.lifecycle.ensure_session();
        self.tx.send(Event::SessionChanged(
            session_id.to_string(),
            self.store.list(&session_id),
        ))?;
        self.send_status()?;

        while let Some(action) = rx.recv().await {
            match action {
                Action::ChatSubmit(input) => {
                    if !self.chat_submit(input).await? {
                        tracing::debug!("UI is gone, stopping actions");
                        return Ok(());
                    }
                }
                Action::ModelSet(name) => {
                    self.model_set(&name)?;
                }
                Action::SessionReset() => {
                    self.session_reset()?;
                }
                Action::SessionShow() => {
                    self.session_show()?;
                }
                Action::TokenSet(token) => {
                    self.token_set(&token)?;
                }
            }

            self.send_status()?;
        }

        return Ok(());
    }

    fn model(&self) -> ModelVariant {
        return self.controller.model().unwrap_or(self.provider_config.model);
    }

    fn send_status(&mut self) -> Result<()> {
        let session_id = self.lifecycle.ensure_session();
        self.tx.send(Event::ChatStatus(
            self.controller.state(),
            session_id,
            self.model(),
        ))?;

        return Ok(());
    }

    fn notice(&self, text: &str) -> Result<()> {
        self.tx
            .send(Event::ChatNotice(Entry::new(Author::Glimpse, text)))?;
        return Ok(());
    }

    fn error_notice(&self, text: &str) -> Result<()> {
        self.tx.send(Event::ChatNotice(Entry::new_with_type(
            Author::Glimpse,
            EntryType::Error,
            text,
        )))?;
        return Ok(());
    }

    /// Rebuilds the provider from the current config. An invalid config
    /// leaves the controller disabled.
    fn rebuild_provider(&mut self) -> Option<ChatError> {
        match ProviderManager::get(&self.provider_config) {
            Ok(provider) => {
                self.controller.set_provider(Some(provider));
                return None;
            }
            Err(err) => {
                self.controller.set_provider(None);
                return Some(err);
            }
        }
    }

    /// Returns false once the UI has hung up.
    async fn chat_submit(&mut self, input: ChatInput) -> Result<bool> {
        let session_id = self.lifecycle.ensure_session();
        let res = self
            .controller
            .submit(&self.store, &session_id, input, &self.tx)
            .await;

        match res {
            Ok(()) => return Ok(true),
            Err(ChatError::Disconnected) => return Ok(false),
            Err(err) => {
                tracing::error!(error = ?err, session_id = %session_id, "Chat submission failed");
                self.tx.send(Event::ChatFailed(err.to_string()))?;
                return Ok(true);
            }
        }
    }

    fn model_set(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return self.error_notice(
                "You must specify a model name with `/model` or `/m`. Run `/help` for more details.",
            );
        }

        let model = match ModelVariant::parse(name) {
            Some(model) => model,
            None => {
                return self.error_notice(&format!(
                    "No model named {} found. Available models are {}.",
                    name.trim(),
                    ModelVariant::VARIANTS.join(", ")
                ));
            }
        };

        self.provider_config.model = model;
        if self.controller.model().is_some() {
            self.rebuild_provider();
        }
        tracing::debug!(model = %model, "Switched model");

        self.tx.send(Event::ChatNotice(Entry::new(
            Author::Model(model),
            &format!("{model} has entered the chat."),
        )))?;

        return Ok(());
    }

    fn session_reset(&mut self) -> Result<()> {
        self.lifecycle.reset_session(&self.store);
        let session_id = self.lifecycle.ensure_session();
        self.tx.send(Event::SessionChanged(
            session_id.to_string(),
            self.store.list(&session_id),
        ))?;

        return Ok(());
    }

    fn session_show(&mut self) -> Result<()> {
        let session_id = self.lifecycle.ensure_session();
        let count = self.store.len(&session_id);
        return self.notice(&format!(
            "Current session is {session_id} with {count} messages."
        ));
    }

    fn token_set(&mut self, token: &str) -> Result<()> {
        self.provider_config.token = token.trim().to_string();

        if let Some(err) = self.rebuild_provider() {
            return self.error_notice(&err.to_string());
        }

        return self.notice("API key set. You're ready to chat.");
    }
}
