//! Conversation bootstrap against the backend.

use hearth_core::{
    ConversationRequest, ConversationResponse, ConversationSession, SessionStatus, WidgetError,
    WidgetResult,
};
use tracing::{debug, error};

use crate::TENANT_HEADER;

/// Guest display name sent until the visitor identifies themselves.
const GUEST_NAME: &str = "Guest";

/// Negotiates a conversation id for the current visitor.
///
/// Called exactly once per widget instance. Bootstrap failures are fatal to
/// the session: there is no retry at this layer, and messaging stays
/// unavailable until the page is reloaded. Only the push channel retries
/// after a session exists.
pub struct ConversationClient {
    client: reqwest::Client,
    api_base: String,
    tenant_id: String,
}

impl ConversationClient {
    pub fn new(client: reqwest::Client, api_base: String, tenant_id: String) -> Self {
        Self {
            client,
            api_base,
            tenant_id,
        }
    }

    /// Run the handshake, driving `session` Uninitialized → Initializing →
    /// Active, or → Failed on any transport or non-2xx failure.
    pub async fn start(
        &self,
        session: &mut ConversationSession,
        visitor_id: &str,
    ) -> WidgetResult<()> {
        session.status = SessionStatus::Initializing;

        match self.request_conversation(visitor_id).await {
            Ok(conversation_id) => {
                debug!(%conversation_id, "conversation established");
                session.conversation_id = Some(conversation_id);
                session.status = SessionStatus::Active;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "conversation bootstrap failed; messaging disabled for this page");
                session.status = SessionStatus::Failed;
                Err(e)
            }
        }
    }

    async fn request_conversation(&self, visitor_id: &str) -> WidgetResult<String> {
        let url = format!("{}/conversation", self.api_base);
        let body = ConversationRequest {
            user_id: visitor_id.to_string(),
            user_name: GUEST_NAME.to_string(),
            user_email: String::new(),
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
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(WidgetError::SessionFailed(format!(
                "conversation endpoint returned {}: {}",
                status, error_text
            )));
        }

        let parsed: ConversationResponse = response
            .json()
            .await
            .map_err(|e| WidgetError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        Ok(parsed.conversation_id)
    }
}
