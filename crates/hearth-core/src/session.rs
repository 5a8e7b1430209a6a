//! Conversation and stream lifecycle states.

/// Lifecycle of the one conversation a widget instance owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Initializing,
    Active,
    Failed,
}

/// One active support conversation.
///
/// Created exactly once per widget instance; a bootstrap failure leaves it
/// `Failed` for the rest of the page life (no mid-session re-initialization).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    pub conversation_id: Option<String>,
    pub status: SessionStatus,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            conversation_id: None,
            status: SessionStatus::Uninitialized,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Live push-channel state.
///
/// `Closed --connect--> Connecting --open--> Open --error--> Reconnecting
/// --timer--> Connecting`; teardown from any state is `Closed` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Closed,
    Connecting,
    Open,
    Reconnecting,
}
