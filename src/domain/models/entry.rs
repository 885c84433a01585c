#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;

use super::Author;
use super::RenderUnit;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryType {
    Normal,
    Error,
}

/// One bubble in the on-screen transcript.
#[derive(Clone, Debug)]
pub struct Entry {
    pub author: Author,
    pub units: Vec<RenderUnit>,
    etype: EntryType,
}

fn clean(text: &str) -> String {
    return text.replace('\t', "  ");
}

impl Entry {
    pub fn new(author: Author, text: &str) -> Entry {
        return Entry::new_with_type(author, EntryType::Normal, text);
    }

    pub fn new_with_type(author: Author, etype: EntryType, text: &str) -> Entry {
        return Entry {
            author,
            units: vec![RenderUnit::Text(clean(text))],
            etype,
        };
    }

    pub fn from_units(author: Author, units: Vec<RenderUnit>) -> Entry {
        return Entry {
            author,
            units: units
                .into_iter()
                .map(|unit| {
                    if let RenderUnit::Text(text) = unit {
                        return RenderUnit::Text(clean(&text));
                    }
                    return unit;
                })
                .collect(),
            etype: EntryType::Normal,
        };
    }

    pub fn entry_type(&self) -> EntryType {
        return self.etype;
    }

    /// Appends streamed text to the trailing text block, starting a new one
    /// when the entry ends with an image.
    pub fn append(&mut self, text: &str) {
        if let Some(RenderUnit::Text(last)) = self.units.last_mut() {
            *last += &clean(text);
            return;
        }

        self.units.push(RenderUnit::Text(clean(text)));
    }

    /// Combined length of every unit, used to detect changes while streaming.
    pub fn content_len(&self) -> usize {
        return self
            .units
            .iter()
            .map(|unit| {
                match unit {
                    RenderUnit::Text(text) => return text.len(),
                    RenderUnit::Image { url } => return url.len(),
                }
            })
            .sum();
    }
}
