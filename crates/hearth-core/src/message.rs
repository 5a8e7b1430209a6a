//! Message timeline types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
///
/// The backend wire format uses `"user"` for the visitor side, so the
/// serde rename keeps the enum name honest while staying compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    #[serde(rename = "user")]
    Visitor,
    Agent,
    System,
}

/// Provenance of a timeline entry.
///
/// `OptimisticLocal` entries were echoed by the outbound sender before any
/// network round trip; `StreamConfirmed` entries arrived on the push
/// channel. The reconciler never suppresses one for the other; the stream
/// manager's sender filter already keeps the visitor's own echo from
/// arriving twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrigin {
    OptimisticLocal,
    StreamConfirmed,
}

/// A unit of conversation content in the display timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Unique within the conversation. Locally generated: a correlation
    /// marker for optimistic echoes, a fresh id for stream deliveries.
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub origin: MessageOrigin,
}

impl ChatMessage {
    /// Visitor message echoed locally before the send resolves.
    pub fn optimistic(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender: Sender::Visitor,
            origin: MessageOrigin::OptimisticLocal,
        }
    }

    /// Agent message delivered on the push channel.
    pub fn from_stream(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender: Sender::Agent,
            origin: MessageOrigin::StreamConfirmed,
        }
    }

    /// Synthetic notice shown to the visitor (e.g. a send failure).
    /// Never deduplicated against server content.
    pub fn system_notice(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender: Sender::System,
            origin: MessageOrigin::OptimisticLocal,
        }
    }
}
