#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum ChatState {
    /// No usable provider credential. Input is refused.
    Disabled,
    Idle,
    Sending,
    Streaming,
    /// The last exchange finished and was written to the session.
    Settled,
}

impl ChatState {
    pub fn accepts_input(&self) -> bool {
        return matches!(self, ChatState::Idle | ChatState::Settled);
    }

    pub fn is_busy(&self) -> bool {
        return matches!(self, ChatState::Sending | ChatState::Streaming);
    }
}
