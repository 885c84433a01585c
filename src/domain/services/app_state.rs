#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::BubbleList;
use super::ImageRefs;
use super::MessageCodec;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatInput;
use crate::domain::models::ChatState;
use crate::domain::models::Entry;
use crate::domain::models::EntryType;
use crate::domain::models::Message;
use crate::domain::models::ModelVariant;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::models::MISSING_TOKEN_NOTICE;

const GREETING: &str = "Hey there! Attach images with `/image`, then ask me about them.";

pub struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub chat_state: ChatState,
    pub entries: Vec<Entry>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub model: ModelVariant,
    pub pending_images: Vec<String>,
    pub scroll: Scroll,
    pub session_id: String,
    pub streaming: bool,
    pub waiting_for_backend: bool,
}

impl<'a> AppState<'a> {
    pub fn new(model: ModelVariant) -> AppState<'a> {
        return AppState {
            bubble_list: BubbleList::new(),
            chat_state: ChatState::Disabled,
            entries: vec![Entry::new(Author::Glimpse, GREETING)],
            last_known_height: 0,
            last_known_width: 0,
            model,
            pending_images: vec![],
            scroll: Scroll::default(),
            session_id: "".to_string(),
            streaming: false,
            waiting_for_backend: false,
        };
    }

    pub fn handle_status(&mut self, state: ChatState, session_id: String, model: ModelVariant) {
        self.chat_state = state;
        self.session_id = session_id;
        self.model = model;

        // Statuses trail the action that produced them, so a late idle status
        // never ends a submitted exchange. Only settling or failing does.
        if state.is_busy() {
            self.waiting_for_backend = true;
        }
    }

    /// Replaces the transcript with the given session's history.
    pub fn handle_session_changed(&mut self, session_id: String, messages: Vec<Message>) {
        let model = self.model;
        self.session_id = session_id;
        self.pending_images.clear();
        self.streaming = false;
        self.entries = vec![Entry::new(Author::Glimpse, GREETING)];
        self.entries
            .extend(messages.iter().map(|message| {
                match message.role() {
                    Role::Human => {
                        return Entry::from_units(Author::User, MessageCodec::render_human(message))
                    }
                    Role::Assistant => {
                        return Entry::new(
                            Author::Model(model),
                            &MessageCodec::render_assistant(message),
                        )
                    }
                }
            }));
        self.bubble_list = BubbleList::new();
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn handle_human_message(&mut self, message: Message) {
        self.streaming = false;
        self.add_entry(Entry::from_units(
            Author::User,
            MessageCodec::render_human(&message),
        ));
    }

    /// Fragments are appended to the reply being streamed, which is started
    /// by the first fragment.
    pub fn handle_fragment(&mut self, text: &str) {
        if self.streaming {
            if let Some(last) = self.entries.last_mut() {
                last.append(text);
                self.sync_dependants();
                return;
            }
        }

        self.streaming = true;
        self.entries.push(Entry::new(Author::Model(self.model), text));
        self.sync_dependants();
    }

    pub fn handle_settled(&mut self, message: Message) {
        if !self.streaming {
            self.entries.push(Entry::new(
                Author::Model(self.model),
                &MessageCodec::render_assistant(&message),
            ));
        }

        self.streaming = false;
        self.waiting_for_backend = false;
        self.sync_dependants();
    }

    /// The partial reply stays on screen, followed by the error.
    pub fn handle_failed(&mut self, text: &str) {
        self.streaming = false;
        self.waiting_for_backend = false;
        self.add_entry(Entry::new_with_type(
            Author::Glimpse,
            EntryType::Error,
            text,
        ));
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.sync_dependants();
        self.scroll.last();
    }

    fn add_notice(&mut self, text: &str) {
        self.add_entry(Entry::new(Author::Glimpse, text));
    }

    fn add_error(&mut self, text: &str) {
        self.add_entry(Entry::new_with_type(
            Author::Glimpse,
            EntryType::Error,
            text,
        ));
    }

    /// Returns (should_break, should_continue). Anything that isn't a slash
    /// command continues on as a chat message.
    pub async fn handle_slash_commands(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        let command = match SlashCommand::parse(input_str) {
            Some(command) => command,
            None => return Ok((false, false)),
        };

        if command.is_quit() {
            return Ok((true, false));
        }

        if command.is_help() {
            self.add_notice(&help_text());
        } else if command.is_image_attach() {
            match ImageRefs::resolve(&command.rest()).await {
                Ok(url) => {
                    let label = ImageRefs::describe(&url);
                    self.pending_images.push(url);
                    self.add_notice(&format!(
                        "Attached {label}. It will be sent with your next message."
                    ));
                }
                Err(err) => {
                    self.add_error(&err.to_string());
                }
            }
        } else if command.is_image_list() {
            if self.pending_images.is_empty() {
                self.add_notice("No images attached.");
            } else {
                let list = self
                    .pending_images
                    .iter()
                    .enumerate()
                    .map(|(idx, url)| {
                        return format!("- ({}) {}", idx + 1, ImageRefs::describe(url));
                    })
                    .collect::<Vec<String>>()
                    .join("\n");
                self.add_notice(&list);
            }
        } else if command.is_image_detach() {
            let count = self.pending_images.len();
            self.pending_images.clear();
            self.add_notice(&format!("Detached {count} images."));
        } else if command.is_clear() {
            tx.send(Action::SessionReset())?;
        } else if command.is_session() {
            tx.send(Action::SessionShow())?;
        } else if command.is_model_set() {
            tx.send(Action::ModelSet(command.rest()))?;
        } else if command.is_key_set() {
            tx.send(Action::TokenSet(command.rest()))?;
        }

        return Ok((false, true));
    }

    /// Sends the text together with every pending image. Refused while the
    /// controller is disabled, in which case pending images are kept.
    pub fn submit(&mut self, text: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.chat_state == ChatState::Disabled {
            self.add_error(MISSING_TOKEN_NOTICE);
            return Ok(());
        }

        let input = ChatInput::new(text, self.pending_images.drain(..).collect());
        if input.is_empty() {
            return Ok(());
        }

        self.waiting_for_backend = true;
        tx.send(Action::ChatSubmit(input))?;

        return Ok(());
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_entries(&self.entries, self.last_known_width.into());

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if self.waiting_for_backend {
            self.scroll.last();
        }
    }
}
