#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use super::ImageRefs;
use crate::domain::models::Author;
use crate::domain::models::Entry;
use crate::domain::models::EntryType;
use crate::domain::models::RenderUnit;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    entry: &'a Entry,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let mut iter = subtractions.into_iter();
    let first = iter.next().unwrap_or(0);
    let count = iter.fold(first, |a, b| {
        return a.saturating_sub(b);
    });

    return text.repeat(count);
}

fn char_len(text: &str) -> usize {
    return text.chars().count();
}

/// Word wraps a single line to `max_width` characters. Words that are longer
/// than a whole line, such as URLs, are hard broken.
fn wrap_text(line: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines: Vec<String> = vec![];
    let mut current = String::new();

    for word in line.split(' ') {
        let mut word = word.to_string();
        let sep = usize::from(!current.is_empty());
        if char_len(&current) + sep + char_len(&word) <= max_width {
            if sep == 1 {
                current.push(' ');
            }
            current += &word;
            continue;
        }

        if !current.is_empty() {
            lines.push(current);
        }

        while char_len(&word) > max_width {
            let split_at = word
                .char_indices()
                .nth(max_width)
                .map(|(idx, _)| return idx)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = word[split_at..].to_string();
        }
        current = word;
    }

    lines.push(current);
    return lines;
}

impl<'a> Bubble<'_> {
    pub fn new(entry: &'a Entry, alignment: BubbleAlignment, window_max_width: usize) -> Bubble {
        return Bubble {
            alignment,
            entry,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    /// Source lines of the entry, before wrapping. Images become a single
    /// labelled line. An empty text part next to an image is skipped.
    fn source_lines(&self) -> Vec<(String, Style)> {
        let has_images = self
            .entry
            .units
            .iter()
            .any(|unit| return matches!(unit, RenderUnit::Image { .. }));

        let mut lines = vec![];
        for unit in &self.entry.units {
            match unit {
                RenderUnit::Text(text) => {
                    if text.is_empty() && has_images {
                        continue;
                    }
                    if text.is_empty() {
                        lines.push((String::new(), Style::default()));
                        continue;
                    }
                    for line in text.lines() {
                        lines.push((line.to_string(), Style::default()));
                    }
                }
                RenderUnit::Image { url } => {
                    lines.push((
                        format!("[image] {}", ImageRefs::describe(url)),
                        Style {
                            fg: Some(Color::Cyan),
                            add_modifier: Modifier::ITALIC,
                            ..Style::default()
                        },
                    ));
                }
            }
        }

        return lines;
    }

    pub fn as_lines(&self) -> Vec<Line<'a>> {
        let source = self.source_lines();
        let max_line_length = self.get_max_line_length(&source);

        let lines = source
            .iter()
            .flat_map(|(line, style)| {
                return wrap_text(line, max_line_length)
                    .into_iter()
                    .map(|wrapped| {
                        return self.spans_to_line(
                            vec![Span::styled(wrapped, *style)],
                            max_line_length,
                        );
                    })
                    .collect::<Vec<Line<'a>>>();
            })
            .collect();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn spans_to_line(&self, mut spans: Vec<Span<'a>>, max_line_length: usize) -> Line<'a> {
        let line_str_len: usize = spans.iter().map(|e| return char_len(&e.content)).sum();
        let fill = repeat_from_subtractions(" ", vec![max_line_length, line_str_len]);
        let formatted_line_length =
            line_str_len + fill.len() + Bubble::style_config().bubble_padding;

        let mut wrapped_spans = vec![self.highlight_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlight_span(format!("{fill} │")));

        let outer_bubble_padding =
            repeat_from_subtractions(" ", vec![self.window_max_width, formatted_line_length]);

        if self.alignment == BubbleAlignment::Left {
            wrapped_spans.push(Span::from(outer_bubble_padding));
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self, source: &[(String, Style)]) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;

        let mut max_line_length = source
            .iter()
            .map(|(line, _)| {
                return char_len(line);
            })
            .max()
            .unwrap_or(0);

        let max_allowed = self.window_max_width.saturating_sub(line_border_width);
        if max_line_length > max_allowed {
            max_line_length = max_allowed;
        }

        let username = &self.entry.author.to_string();
        if max_line_length < char_len(username) {
            max_line_length = char_len(username);
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(&self, lines: Vec<Line<'a>>, max_line_length: usize) -> Vec<Line<'a>> {
        // Add 2 for the vertical bars.
        let inner_bar = "─".repeat(max_line_length + 2);
        let top_left_border = "╭";
        let mut top_bar = format!("{top_left_border}{inner_bar}╮");
        let bottom_bar = format!("╰{inner_bar}╯");
        let bar_bubble_padding = repeat_from_subtractions(
            " ",
            vec![
                self.window_max_width,
                max_line_length,
                Bubble::style_config().bubble_padding,
            ],
        );

        let username = &self.entry.author.to_string();
        let top_replace = "─".repeat(char_len(username));
        top_bar = top_bar.replace(
            format!("{top_left_border}{top_replace}").as_str(),
            format!("{top_left_border}{username}").as_str(),
        );

        if self.alignment == BubbleAlignment::Left {
            let mut res = vec![self.highlight_line(format!("{top_bar}{bar_bubble_padding}"))];
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
            return res;
        }

        let mut res = vec![self.highlight_line(format!("{bar_bubble_padding}{top_bar}"))];
        res.extend(lines);
        res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'a> {
        if self.entry.entry_type() == EntryType::Error {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Red),
                    ..Style::default()
                },
            );
        } else if self.entry.author == Author::Glimpse {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Rgb(95, 135, 175)),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'a> {
        return Line::from(self.highlight_span(text));
    }
}
