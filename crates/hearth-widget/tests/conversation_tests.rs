//! Conversation bootstrap tests.
//!
//! These exercise the handshake against a wiremock backend: payload
//! fidelity, tenant header, status transitions, and the no-retry policy on
//! bootstrap failure.

use hearth_core::{ConversationSession, SessionStatus};
use hearth_widget::ConversationClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ConversationClient {
    ConversationClient::new(
        reqwest::Client::new(),
        server.uri(),
        "tenant-1".to_string(),
    )
}

// ============================================================================
// Successful handshake
// ============================================================================

#[tokio::test]
async fn handshake_activates_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/conversation"))
        .and(header("x-tenant-id", "tenant-1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"conversationId":"c-1"}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ConversationSession::new();
    client_for(&server)
        .start(&mut session, "guest-123")
        .await
        .expect("handshake should succeed");

    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.conversation_id.as_deref(), Some("c-1"));
}

#[tokio::test]
async fn handshake_sends_guest_placeholder_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/conversation"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"conversationId":"c-1"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let mut session = ConversationSession::new();
    client_for(&server)
        .start(&mut session, "guest-123")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["userId"], "guest-123");
    assert_eq!(body["userName"], "Guest");
    assert_eq!(body["userEmail"], "");
}

// ============================================================================
// Bootstrap failures (fatal to the session, never retried)
// ============================================================================

#[tokio::test]
async fn server_error_fails_session_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/conversation"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1) // exactly one attempt, no retry
        .mount(&server)
        .await;

    let mut session = ConversationSession::new();
    let result = client_for(&server).start(&mut session, "guest-123").await;

    assert!(result.is_err());
    assert_eq!(session.status, SessionStatus::Failed);
    assert_eq!(session.conversation_id, None);
}

#[tokio::test]
async fn unreachable_backend_fails_session() {
    let client = ConversationClient::new(
        reqwest::Client::new(),
        "http://127.0.0.1:1".to_string(),
        "tenant-1".to_string(),
    );

    let mut session = ConversationSession::new();
    let result = client.start(&mut session, "guest-123").await;

    assert!(result.is_err());
    assert_eq!(session.status, SessionStatus::Failed);
}

#[tokio::test]
async fn malformed_response_fails_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/conversation"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let mut session = ConversationSession::new();
    let result = client_for(&server).start(&mut session, "guest-123").await;

    assert!(result.is_err());
    assert_eq!(session.status, SessionStatus::Failed);
}
