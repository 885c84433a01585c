#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

const PAGE_LINES: u16 = 10;

/// Scroll offset into the transcript. While following, the view sticks to the
/// newest line as replies stream in. Scrolling up stops following until the
/// bottom is reached again.
#[derive(Default)]
pub struct Scroll {
    content_length: u16,
    following: bool,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.content_length.saturating_sub(self.viewport_length);
    }

    fn sync_scrollbar(&mut self) {
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(self.content_length)
            .viewport_content_length(self.viewport_length)
            .position(self.position);
    }

    fn up_by(&mut self, lines: u16) {
        self.position = self.position.saturating_sub(lines);
        self.following = false;
        self.sync_scrollbar();
    }

    fn down_by(&mut self, lines: u16) {
        self.position = self.position.saturating_add(lines).min(self.max_position());
        self.following = self.position == self.max_position();
        self.sync_scrollbar();
    }

    pub fn is_following(&self) -> bool {
        return self.following;
    }

    pub fn up(&mut self) {
        self.up_by(1);
    }

    pub fn up_page(&mut self) {
        self.up_by(PAGE_LINES);
    }

    pub fn down(&mut self) {
        self.down_by(1);
    }

    pub fn down_page(&mut self) {
        self.down_by(PAGE_LINES);
    }

    pub fn last(&mut self) {
        self.position = self.max_position();
        self.following = true;
        self.sync_scrollbar();
    }

    pub fn set_state(&mut self, content_length: u16, viewport_length: u16) {
        self.content_length = content_length;
        self.viewport_length = viewport_length;

        if self.following {
            self.position = self.max_position();
        } else {
            self.position = self.position.min(self.max_position());
        }
        self.sync_scrollbar();
    }
}
