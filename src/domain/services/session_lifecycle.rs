#[cfg(test)]
#[path = "session_lifecycle_test.rs"]
mod tests;

use uuid::Uuid;

use super::SessionStore;

/// Owns the identifier of the current chat session.
#[derive(Default)]
pub struct SessionLifecycle {
    session_id: Option<String>,
}

impl SessionLifecycle {
    pub fn create_id() -> String {
        return Uuid::new_v4().to_string();
    }

    /// Returns the current id, minting one first if there is none.
    pub fn ensure_session(&mut self) -> String {
        if let Some(session_id) = &self.session_id {
            return session_id.to_string();
        }

        let session_id = SessionLifecycle::create_id();
        tracing::debug!(session_id = %session_id, "Created session");
        self.session_id = Some(session_id.to_string());

        return session_id;
    }

    pub fn current(&self) -> Option<&str> {
        return self.session_id.as_deref();
    }

    /// Drops the current session's history and forgets its id, so the next
    /// `ensure_session` starts a fresh one.
    pub fn reset_session(&mut self, store: &SessionStore) {
        if let Some(session_id) = self.session_id.take() {
            tracing::debug!(session_id = %session_id, "Reset session");
            store.clear(&session_id);
        }
    }
}
