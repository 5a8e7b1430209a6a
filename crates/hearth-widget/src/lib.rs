//! Session and event-stream manager for the Hearth support-chat widget.
//!
//! This crate implements the stateful core of the widget: resolving a
//! durable anonymous visitor identity, negotiating a conversation with the
//! backend, supervising the live push channel for agent replies, merging
//! locally-echoed and stream-delivered messages into one ordered view, and
//! posting visitor messages with an optimistic echo.
//!
//! The display layer (rendering, animation, launcher chrome) is out of
//! scope; it only ever reads [`ChatWidget::messages`].
//!
//! # Quick start
//!
//! ```rust,no_run
//! use hearth_widget::{ChatWidget, WidgetConfig};
//!
//! # async fn run() {
//! let config = WidgetConfig::new("tenant-42", "https://chat.example.com/api");
//! let widget = ChatWidget::init(config).expect("tenant id present");
//! widget.start().await;
//! widget.send("hello").await;
//! for message in widget.messages() {
//!     println!("{:?}: {}", message.sender, message.text);
//! }
//! # }
//! ```

/// Header carrying tenant scoping on the JSON endpoints. The stream
/// transport cannot carry custom headers, so the same value rides the query
/// string there (a compatibility accommodation, not an authorization
/// mechanism).
pub const TENANT_HEADER: &str = "x-tenant-id";

pub mod config;
pub mod conversation;
pub mod identity;
pub mod reconciler;
pub mod sender;
pub mod sse;
pub mod stream;
pub mod widget;

pub use config::{RetryPolicy, WidgetConfig};
pub use conversation::ConversationClient;
pub use identity::IdentityStore;
pub use reconciler::MessageReconciler;
pub use sender::OutboundSender;
pub use stream::StreamManager;
pub use widget::ChatWidget;

// Re-export the domain types embedders see in the message view.
pub use hearth_core::{
    ChatMessage, ConversationSession, MessageOrigin, Sender, SessionStatus, StreamState,
    WidgetError, WidgetResult,
};
