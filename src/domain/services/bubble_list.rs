use std::collections::HashMap;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Entry;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

struct BubbleCacheEntry<'a> {
    content_len: usize,
    lines: Vec<Line<'a>>,
}

#[derive(Default)]
pub struct BubbleList<'a> {
    cache: HashMap<usize, BubbleCacheEntry<'a>>,
    line_width: usize,
    lines_len: usize,
}

impl<'a> BubbleList<'a> {
    pub fn new() -> BubbleList<'a> {
        return BubbleList::default();
    }

    /// Rebuilds the rendered lines of every entry whose content changed since
    /// the last call. Only the trailing entry can grow while streaming.
    pub fn set_entries(&mut self, entries: &[Entry], line_width: usize) {
        if self.line_width != line_width || self.cache.len() > entries.len() {
            self.cache.clear();
            self.line_width = line_width;
        }

        self.lines_len = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                if let Some(cache_entry) = self.cache.get(&idx) {
                    if idx < (entries.len() - 1) || entry.content_len() == cache_entry.content_len
                    {
                        return cache_entry.lines.len();
                    }
                }

                let mut align = BubbleAlignment::Left;
                if entry.author == Author::User {
                    align = BubbleAlignment::Right;
                }

                let bubble_lines = Bubble::new(entry, align, line_width).as_lines();
                let bubble_line_len = bubble_lines.len();

                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        content_len: entry.content_len(),
                        lines: bubble_lines,
                    },
                );

                return bubble_line_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();
        let lines: Vec<Line<'a>> = indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|cache_entry| {
                return cache_entry.lines.to_owned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
