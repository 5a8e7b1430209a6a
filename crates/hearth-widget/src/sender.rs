//! Outbound visitor messages.

use std::sync::Arc;

use hearth_core::{ChatMessage, OutboundMessage, WidgetError, WidgetResult};
use tracing::warn;

use crate::reconciler::MessageReconciler;
use crate::TENANT_HEADER;

/// Inline notice appended when a send fails. The optimistic echo itself is
/// never rolled back or marked.
const SEND_FAILED_NOTICE: &str = "Your message could not be delivered. Please try again.";

/// Posts visitor messages and feeds the optimistic echo into the reconciler.
///
/// No retry, no request deduplication, no idempotency key: a repeated user
/// action produces a second request.
pub struct OutboundSender {
    client: reqwest::Client,
    api_base: String,
    tenant_id: String,
    conversation_id: String,
    visitor_id: String,
    reconciler: Arc<MessageReconciler>,
}

impl OutboundSender {
    pub fn new(
        client: reqwest::Client,
        api_base: String,
        tenant_id: String,
        conversation_id: String,
        visitor_id: String,
        reconciler: Arc<MessageReconciler>,
    ) -> Self {
        Self {
            client,
            api_base,
            tenant_id,
            conversation_id,
            visitor_id,
            reconciler,
        }
    }

    /// Send a visitor message.
    ///
    /// Empty or whitespace-only input is silently ignored. Otherwise the
    /// optimistic echo is applied before any network activity, so the
    /// visitor sees their message instantly regardless of latency. A failed
    /// delivery appends a separate system notice; it is logged, never
    /// returned to the caller.
    pub async fn send(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.reconciler
            .apply_local_echo(ChatMessage::optimistic(text));

        if let Err(e) = self.post_message(text).await {
            warn!(error = %e, "message delivery failed");
            self.reconciler
                .apply_local_echo(ChatMessage::system_notice(SEND_FAILED_NOTICE));
        }
    }

    async fn post_message(&self, text: &str) -> WidgetResult<()> {
        let url = format!("{}/message/user", self.api_base);
        let body = OutboundMessage {
            conversation_id: self.conversation_id.clone(),
            text: text.to_string(),
            user_id: self.visitor_id.clone(),
        };

        let response = self
            .client
            .post(&url)
            .header(TENANT_HEADER, &self.tenant_id)
            .json(&body)
            .send()
            .await
            .map_err(|e| WidgetError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WidgetError::Http(format!(
                "message endpoint returned {}",
                response.status()
            )));
        }

        // No meaningful response body is required by the widget.
        Ok(())
    }
}
