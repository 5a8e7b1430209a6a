//! Core types for the Hearth support-chat widget.
//!
//! This crate holds the domain model shared by the widget components: the
//! message timeline types, the conversation/stream lifecycle states, the
//! wire payloads for the backend endpoints, and the error taxonomy. It does
//! no I/O; all network and storage behavior lives in `hearth-widget`.

pub mod error;
pub mod message;
pub mod session;
pub mod wire;

pub use error::{WidgetError, WidgetResult};
pub use message::{ChatMessage, MessageOrigin, Sender};
pub use session::{ConversationSession, SessionStatus, StreamState};
pub use wire::{ConversationRequest, ConversationResponse, OutboundMessage, StreamEvent};
