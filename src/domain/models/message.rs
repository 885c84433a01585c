#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Role;

/// One piece of a message's content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    /// A remote URL or an inline `data:` URI.
    Image { url: String },
}

/// A chat message as kept in a session log. Fields are private so a message
/// cannot change once it has been built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: Vec<ContentPart>,
}

impl Message {
    pub fn human(content: Vec<ContentPart>) -> Message {
        return Message {
            role: Role::Human,
            content,
        };
    }

    pub fn assistant(text: &str) -> Message {
        return Message {
            role: Role::Assistant,
            content: vec![ContentPart::Text {
                text: text.to_string(),
            }],
        };
    }

    pub fn role(&self) -> Role {
        return self.role;
    }

    pub fn content(&self) -> &[ContentPart] {
        return &self.content;
    }

    /// All text parts joined by newlines.
    pub fn text(&self) -> String {
        return self
            .content
            .iter()
            .filter_map(|part| {
                if let ContentPart::Text { text } = part {
                    return Some(text.as_str());
                }
                return None;
            })
            .collect::<Vec<&str>>()
            .join("\n");
    }

    pub fn images(&self) -> Vec<&str> {
        return self
            .content
            .iter()
            .filter_map(|part| {
                if let ContentPart::Image { url } = part {
                    return Some(url.as_str());
                }
                return None;
            })
            .collect();
    }
}
