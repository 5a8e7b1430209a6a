//! Error taxonomy for widget operations.

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Widget operation errors
///
/// Transport and parse failures are converted into these at the boundary of
/// the component that issued the call. They never propagate to the embedding
/// page as panics; see the per-component handling policy in `hearth-widget`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WidgetError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("conversation session failed: {0}")]
    SessionFailed(String),
}
