#[cfg(test)]
#[path = "prompt_assembler_test.rs"]
mod tests;

use chrono::Local;
use chrono::NaiveDateTime;

use crate::domain::models::Message;
use crate::domain::models::PromptContext;

pub struct PromptAssembler {
    date_time: String,
}

impl Default for PromptAssembler {
    fn default() -> PromptAssembler {
        return PromptAssembler::new(Local::now().naive_local());
    }
}

impl PromptAssembler {
    /// The time is captured here once and reused for every prompt, it is not
    /// refreshed per request.
    pub fn new(captured_at: NaiveDateTime) -> PromptAssembler {
        return PromptAssembler {
            date_time: captured_at.format("%B %d, %Y %H:%M:%S").to_string(),
        };
    }

    pub fn system_prompt(&self) -> String {
        return format!(
            "You are a multimodal AI chatbot having a conversation with a human. You can accept text and images as input, but you can only respond with text. The current time is {}.",
            self.date_time
        );
    }

    pub fn build(&self, history: &[Message], input: &Message) -> PromptContext {
        return PromptContext {
            system: self.system_prompt(),
            history: history.to_vec(),
            input: input.clone(),
        };
    }
}
