#[cfg(test)]
#[path = "message_codec_test.rs"]
mod tests;

use crate::domain::models::ChatInput;
use crate::domain::models::ContentPart;
use crate::domain::models::Message;
use crate::domain::models::RenderUnit;

/// Converts between raw widget input, stored messages and display units.
pub struct MessageCodec {}

impl MessageCodec {
    /// The text part always comes first, even when empty, followed by one
    /// image part per attachment in the order given.
    pub fn encode_human_input(input: ChatInput) -> Message {
        let mut content = vec![ContentPart::Text { text: input.text }];
        content.extend(
            input
                .images
                .into_iter()
                .map(|url| return ContentPart::Image { url }),
        );

        return Message::human(content);
    }

    pub fn render_human(message: &Message) -> Vec<RenderUnit> {
        return message
            .content()
            .iter()
            .map(|part| {
                match part {
                    ContentPart::Text { text } => return RenderUnit::Text(text.to_string()),
                    ContentPart::Image { url } => {
                        return RenderUnit::Image {
                            url: url.to_string(),
                        }
                    }
                }
            })
            .collect();
    }

    pub fn render_assistant(message: &Message) -> String {
        return message.text();
    }
}
