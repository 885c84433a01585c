use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

/// Takes the place of the input box while input is not accepted.
pub struct Banner {
    text: String,
    style: Style,
}

impl Banner {
    pub fn waiting() -> Banner {
        return Banner {
            text: "Waiting for a response...".to_string(),
            style: Style::default(),
        };
    }

    pub fn disabled(reason: &str) -> Banner {
        return Banner {
            text: reason.to_string(),
            style: Style {
                fg: Some(Color::Red),
                ..Style::default()
            },
        };
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        frame.render_widget(
            Paragraph::new(self.text.to_string())
                .style(self.style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center),
            rect,
        );
    }
}
