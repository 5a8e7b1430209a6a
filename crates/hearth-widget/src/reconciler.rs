//! Ordered message view for the display layer.
//!
//! The reconciler is an append-only sequence keyed by insertion order: the
//! visitor's optimistic echo and stream-delivered agent messages are both
//! inserted at call time, so the view reflects "what happened locally,
//! when" rather than a server-authoritative order. No cross-origin dedup is
//! needed: the stream manager drops visitor-originated wire events before
//! they reach this layer.

use std::sync::Mutex;

use hearth_core::ChatMessage;

/// Merges locally-echoed and stream-delivered messages into the single
/// sequence the display layer renders.
#[derive(Debug, Default)]
pub struct MessageReconciler {
    timeline: Mutex<Vec<ChatMessage>>,
}

impl MessageReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message echoed locally (visitor send or system notice).
    pub fn apply_local_echo(&self, message: ChatMessage) {
        self.append(message);
    }

    /// Append a message delivered on the push channel.
    pub fn apply_stream_message(&self, message: ChatMessage) {
        self.append(message);
    }

    /// Snapshot of the timeline in insertion order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.timeline.lock().expect("timeline lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.timeline.lock().expect("timeline lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn append(&self, message: ChatMessage) {
        self.timeline
            .lock()
            .expect("timeline lock poisoned")
            .push(message);
    }
}
