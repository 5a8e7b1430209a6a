//! Wire payloads for the backend endpoints.
//!
//! These schemas are authoritative for compatibility; field names are
//! reproduced exactly as the backend expects them.

use serde::{Deserialize, Serialize};

use crate::message::Sender;

/// Request body for `POST {apiBase}/conversation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
}

/// Response body for `POST {apiBase}/conversation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
}

/// One event payload on `GET {apiBase}/stream/{conversationId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamEvent {
    pub sender: Sender,
    pub text: String,
}

/// Request body for `POST {apiBase}/message/user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
    pub text: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_request_field_names() {
        let req = ConversationRequest {
            user_id: "guest-1".into(),
            user_name: "Guest".into(),
            user_email: String::new(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["userId"], "guest-1");
        assert_eq!(json["userName"], "Guest");
        assert_eq!(json["userEmail"], "");
    }

    #[test]
    fn stream_event_parses_all_senders() {
        let agent: StreamEvent =
            serde_json::from_str(r#"{"sender":"agent","text":"hi"}"#).unwrap();
        assert_eq!(agent.sender, Sender::Agent);
        assert_eq!(agent.text, "hi");

        let user: StreamEvent =
            serde_json::from_str(r#"{"sender":"user","text":"me"}"#).unwrap();
        assert_eq!(user.sender, Sender::Visitor);

        let system: StreamEvent =
            serde_json::from_str(r#"{"sender":"system","text":"note"}"#).unwrap();
        assert_eq!(system.sender, Sender::System);
    }

    #[test]
    fn outbound_message_field_names() {
        let msg = OutboundMessage {
            conversation_id: "c-1".into(),
            text: "hello".into(),
            user_id: "guest-1".into(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["conversationId"], "c-1");
        assert_eq!(json["text"], "hello");
        assert_eq!(json["userId"], "guest-1");
    }
}
