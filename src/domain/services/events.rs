#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK_MS: u64 = 500;

/// Maps a key press to what the UI should do with it. Anything unbound is
/// typed into the input box, including ALT+Enter which inserts a newline.
pub fn map_input(input: Input) -> Event {
    match input {
        Input {
            key: Key::Enter,
            alt: false,
            ..
        } => return Event::KeyboardEnter(),
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => return Event::KeyboardCTRLC(),
        Input {
            key: Key::Up | Key::MouseScrollUp,
            ..
        } => return Event::UIScrollUp(),
        Input {
            key: Key::Down | Key::MouseScrollDown,
            ..
        } => return Event::UIScrollDown(),
        Input {
            key: Key::PageUp, ..
        }
        | Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => return Event::UIScrollPageUp(),
        Input {
            key: Key::PageDown, ..
        }
        | Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => return Event::UIScrollPageDown(),
        input => return Event::KeyboardCharInput(input),
    }
}

pub fn map_mouse(kind: MouseEventKind) -> Option<Event> {
    match kind {
        MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
        MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
        _ => return None,
    }
}

fn map_crossterm(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(keyevent) => return Some(map_input(keyevent.into())),
        CrosstermEvent::Mouse(mouseevent) => return map_mouse(mouseevent.kind),
        CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
        _ => return None,
    }
}

/// Merges terminal input, chat events from the actions task and a periodic
/// tick into a single stream for the UI loop.
pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
    events_closed: bool,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
            events_closed: false,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv(), if !self.events_closed => {
                    if event.is_none() {
                        tracing::debug!("Actions task closed its event channel");
                        self.events_closed = true;
                    }
                    event
                },
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => map_crossterm(input),
                    Some(Err(err)) => {
                        tracing::warn!(error = ?err, "Failed to read terminal event");
                        None
                    },
                    None => None,
                },
                _ = time::sleep(time::Duration::from_millis(TICK_MS)) => Some(Event::UITick()),
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
