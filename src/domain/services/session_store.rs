#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use dashmap::DashMap;

use crate::domain::models::Message;

/// In-memory message logs keyed by session id. Each session's log is
/// independent, so different sessions can be written concurrently.
#[derive(Default)]
pub struct SessionStore {
    logs: DashMap<String, Vec<Message>>,
}

impl SessionStore {
    /// Unknown ids get a new empty log.
    pub fn append(&self, session_id: &str, message: Message) {
        self.logs
            .entry(session_id.to_string())
            .or_default()
            .push(message);
    }

    /// Appends several messages under a single lock so a reader never sees
    /// half of an exchange.
    pub fn extend(&self, session_id: &str, messages: Vec<Message>) {
        self.logs
            .entry(session_id.to_string())
            .or_default()
            .extend(messages);
    }

    pub fn list(&self, session_id: &str) -> Vec<Message> {
        if let Some(log) = self.logs.get(session_id) {
            return log.clone();
        }

        return vec![];
    }

    pub fn len(&self, session_id: &str) -> usize {
        if let Some(log) = self.logs.get(session_id) {
            return log.len();
        }

        return 0;
    }

    pub fn clear(&self, session_id: &str) {
        self.logs.remove(session_id);
    }
}
