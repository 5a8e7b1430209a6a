//! Widget configuration.

use std::path::PathBuf;
use std::time::Duration;

use hearth_core::{WidgetError, WidgetResult};

/// Reconnect policy for the push channel.
///
/// The default is a fixed 5 second delay between attempts with no upper
/// bound on the attempt count. Embedders who want a
/// circuit breaker can bound the attempt count; exhausting a bounded policy
/// closes the stream permanently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed delay applied before every reconnect attempt.
    pub delay: Duration,
    /// Maximum consecutive reconnect attempts; `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    /// Fixed delay, unlimited attempts.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    /// Fixed delay with an attempt cap.
    pub fn bounded(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: Some(max_attempts),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(Self::DEFAULT_DELAY)
    }
}

/// Configuration accepted by the widget's single entry point.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Tenant the conversation is scoped to. Required; an empty value
    /// aborts initialization.
    pub tenant_id: String,
    /// Base URL of the chat backend, without a trailing slash.
    pub api_base_url: String,
    /// Display hint passed through to the (out of scope) chrome layer.
    pub primary_color: Option<String>,
    /// Push-channel reconnect policy.
    pub retry: RetryPolicy,
    /// Override for the visitor-id storage file. Defaults to a file under
    /// the platform data directory.
    pub identity_path: Option<PathBuf>,
}

impl WidgetConfig {
    pub fn new(tenant_id: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            tenant_id: tenant_id.into(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            primary_color: None,
            retry: RetryPolicy::default(),
            identity_path: None,
        }
    }

    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = Some(color.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_identity_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_path = Some(path.into());
        self
    }

    /// Validate the required fields.
    pub fn validate(&self) -> WidgetResult<()> {
        if self.tenant_id.trim().is_empty() {
            return Err(WidgetError::Config("tenantId is required".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(WidgetError::Config("apiBaseUrl is required".to_string()));
        }
        Ok(())
    }
}
