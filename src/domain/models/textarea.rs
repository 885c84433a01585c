#[cfg(test)]
#[path = "textarea_test.rs"]
mod tests;

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

const INPUT_TITLE: &str = "Message (ALT+Enter for a new line, /image to attach, /help for commands)";

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(INPUT_TITLE)
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }

    /// Everything typed so far, with lines joined back together.
    pub fn contents(textarea: &tui_textarea::TextArea) -> String {
        return textarea.lines().join("\n");
    }

    /// Pasted text is typed in as is, newlines included.
    pub fn paste(textarea: &mut tui_textarea::TextArea, text: &str) {
        for char in text.chars() {
            match char {
                '\n' => textarea.insert_newline(),
                '\r' => (),
                _ => textarea.insert_char(char),
            }
        }
    }
}
