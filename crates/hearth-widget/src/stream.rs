//! Push-channel supervision.
//!
//! The stream manager owns the one long-lived external resource in the
//! widget: the live SSE channel carrying agent replies. It opens the
//! channel, forwards agent messages to the reconciler, and keeps the
//! channel alive across failures with a fixed-delay reconnect (5 seconds
//! and unlimited attempts by default; see [`RetryPolicy`] for the bounded
//! variant).
//!
//! State machine:
//! `Closed --connect--> Connecting --open--> Open --error--> Reconnecting
//! --timer elapses--> Connecting`, with teardown moving any state to
//! `Closed` (terminal).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::StreamExt;
use hearth_core::{ChatMessage, Sender, StreamEvent, StreamState, WidgetError, WidgetResult};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::RetryPolicy;
use crate::reconciler::MessageReconciler;

/// Maintains a single live push channel bound to one conversation.
pub struct StreamManager {
    client: reqwest::Client,
    api_base: String,
    tenant_id: String,
    conversation_id: String,
    retry: RetryPolicy,
    reconciler: Arc<MessageReconciler>,
    state: Arc<Mutex<StreamState>>,
    started: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl StreamManager {
    pub fn new(
        client: reqwest::Client,
        api_base: String,
        tenant_id: String,
        conversation_id: String,
        retry: RetryPolicy,
        reconciler: Arc<MessageReconciler>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            client,
            api_base,
            tenant_id,
            conversation_id,
            retry,
            reconciler,
            state: Arc::new(Mutex::new(StreamState::Closed)),
            started: AtomicBool::new(false),
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Current channel state.
    pub fn state(&self) -> StreamState {
        *self.state.lock().expect("stream state lock poisoned")
    }

    /// Open the channel and start supervising it.
    ///
    /// Idempotent: a call while the channel is already being supervised
    /// (Connecting, Open, or Reconnecting) is a no-op, so at most one live
    /// channel exists per conversation.
    pub fn connect(self: Arc<Self>) {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("stream already supervised; ignoring connect");
            return;
        }

        self.set_state(StreamState::Connecting);
        tokio::spawn(async move {
            self.supervise().await;
        });
    }

    /// Tear the channel down. Terminal: the supervisor exits and no further
    /// reconnect is scheduled. Idempotent.
    pub fn shutdown(&self) {
        info!("stream teardown requested");
        let _ = self.shutdown_tx.send(true);
        self.set_state(StreamState::Closed);
    }

    /// Address of the push channel. The transport cannot carry custom
    /// headers, so tenant scoping rides the query string; callers must not
    /// treat it as authorization.
    fn stream_url(&self) -> String {
        format!(
            "{}/stream/{}?x-tenant-id={}",
            self.api_base,
            self.conversation_id,
            urlencoding::encode(&self.tenant_id)
        )
    }

    fn set_state(&self, next: StreamState) {
        *self.state.lock().expect("stream state lock poisoned") = next;
    }

    fn is_shut_down(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// Connect/consume/reconnect loop. Runs until teardown, or until a
    /// bounded retry policy is exhausted.
    async fn supervise(self: Arc<Self>) {
        let mut shutdown_rx = self.shutdown_rx.clone();
        let mut consecutive_failures = 0u32;

        loop {
            if self.is_shut_down() {
                break;
            }

            self.set_state(StreamState::Connecting);
            match self.consume_channel(&mut shutdown_rx).await {
                Ok(()) => {
                    // Channel ended because teardown was requested.
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "stream channel lost");
                }
            }

            if self.is_shut_down() {
                break;
            }

            consecutive_failures += 1;
            if let Some(max) = self.retry.max_attempts {
                if consecutive_failures > max {
                    warn!(
                        attempts = consecutive_failures - 1,
                        "reconnect attempts exhausted; closing stream"
                    );
                    break;
                }
            }

            self.set_state(StreamState::Reconnecting);
            debug!(delay_ms = self.retry.delay.as_millis() as u64, "reconnect scheduled");
            tokio::select! {
                _ = tokio::time::sleep(self.retry.delay) => {}
                _ = shutdown_rx.changed() => break,
            }
        }

        self.set_state(StreamState::Closed);
        info!("stream closed");
    }

    /// Open the channel and pump events until it fails or teardown fires.
    ///
    /// Returns `Ok(())` only on teardown; a server-closed or errored channel
    /// returns the failure so the supervisor can schedule a reconnect.
    async fn consume_channel(
        &self,
        shutdown_rx: &mut watch::Receiver<bool>,
    ) -> WidgetResult<()> {
        let url = self.stream_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WidgetError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WidgetError::Http(format!(
                "stream endpoint returned {}",
                response.status()
            )));
        }

        self.set_state(StreamState::Open);
        info!(conversation_id = %self.conversation_id, "stream open");

        let mut body = response.bytes_stream();
        let mut parser = crate::sse::EventParser::new();

        loop {
            tokio::select! {
                chunk = body.next() => match chunk {
                    Some(Ok(bytes)) => {
                        for payload in parser.push(&String::from_utf8_lossy(&bytes)) {
                            self.dispatch(&payload);
                        }
                    }
                    Some(Err(e)) => {
                        return Err(WidgetError::Http(e.to_string()));
                    }
                    None => {
                        return Err(WidgetError::Http("stream ended by server".to_string()));
                    }
                },
                _ = shutdown_rx.changed() => {
                    debug!("stream closing on teardown");
                    return Ok(());
                }
            }
        }
    }

    /// Parse one event payload and forward it if it is agent-originated.
    ///
    /// Visitor-originated events are the wire echo of what the visitor just
    /// sent; the optimistic local entry already covers them, so they are
    /// dropped here to avoid double-display. Malformed payloads are logged
    /// and skipped without killing the channel.
    fn dispatch(&self, payload: &str) {
        match serde_json::from_str::<StreamEvent>(payload) {
            Ok(event) if event.sender == Sender::Agent => {
                self.reconciler
                    .apply_stream_message(ChatMessage::from_stream(event.text));
            }
            Ok(event) => {
                debug!(sender = ?event.sender, "dropping non-agent stream event");
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed stream event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_manager(reconciler: Arc<MessageReconciler>) -> Arc<StreamManager> {
        Arc::new(StreamManager::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1".to_string(),
            "tenant-1".to_string(),
            "c-1".to_string(),
            RetryPolicy::fixed(Duration::from_secs(5)),
            reconciler,
        ))
    }

    #[test]
    fn stream_url_carries_conversation_and_tenant() {
        let manager = test_manager(Arc::new(MessageReconciler::new()));
        assert_eq!(
            manager.stream_url(),
            "http://127.0.0.1:1/stream/c-1?x-tenant-id=tenant-1"
        );
    }

    #[test]
    fn tenant_id_is_query_encoded() {
        let manager = Arc::new(StreamManager::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1".to_string(),
            "tenant one".to_string(),
            "c-1".to_string(),
            RetryPolicy::default(),
            Arc::new(MessageReconciler::new()),
        ));
        assert!(manager.stream_url().ends_with("?x-tenant-id=tenant%20one"));
    }

    #[test]
    fn dispatch_forwards_only_agent_events() {
        let reconciler = Arc::new(MessageReconciler::new());
        let manager = test_manager(Arc::clone(&reconciler));

        manager.dispatch(r#"{"sender":"agent","text":"hi"}"#);
        manager.dispatch(r#"{"sender":"user","text":"echo of my own send"}"#);
        manager.dispatch(r#"{"sender":"system","text":"server notice"}"#);

        let view = reconciler.messages();
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].text, "hi");
        assert_eq!(view[0].sender, Sender::Agent);
    }

    #[test]
    fn dispatch_skips_malformed_payloads() {
        let reconciler = Arc::new(MessageReconciler::new());
        let manager = test_manager(Arc::clone(&reconciler));

        manager.dispatch("{not json");
        manager.dispatch(r#"{"sender":"agent"}"#);
        assert!(reconciler.is_empty());
    }

    #[tokio::test]
    async fn shutdown_is_terminal_and_idempotent() {
        let manager = test_manager(Arc::new(MessageReconciler::new()));
        manager.shutdown();
        manager.shutdown();
        assert_eq!(manager.state(), StreamState::Closed);
    }
}
