//! Root widget controller.
//!
//! The only surface exposed to the embedding page. Owns the one explicit
//! session object per page (no ambient globals) and threads it into the
//! components: identity store, conversation client, stream manager, and
//! outbound sender.

use std::sync::{Arc, Mutex};

use hearth_core::{ChatMessage, ConversationSession, SessionStatus, StreamState};
use tracing::{error, info, warn};

use crate::config::WidgetConfig;
use crate::conversation::ConversationClient;
use crate::identity::IdentityStore;
use crate::reconciler::MessageReconciler;
use crate::sender::OutboundSender;
use crate::stream::StreamManager;

/// One embeddable chat widget instance.
pub struct ChatWidget {
    config: WidgetConfig,
    client: reqwest::Client,
    identity: IdentityStore,
    reconciler: Arc<MessageReconciler>,
    session: tokio::sync::Mutex<ConversationSession>,
    stream: Mutex<Option<Arc<StreamManager>>>,
    sender: Mutex<Option<Arc<OutboundSender>>>,
}

impl ChatWidget {
    /// Initialize the widget from embed configuration.
    ///
    /// A missing tenant id (or api base) fails silently to the page: the
    /// failure is logged, `None` is returned, and nothing is created: no
    /// identity write, no network activity.
    pub fn init(config: WidgetConfig) -> Option<Self> {
        if let Err(e) = config.validate() {
            error!(error = %e, "widget initialization aborted");
            return None;
        }

        let identity = match &config.identity_path {
            Some(path) => IdentityStore::at(path.clone()),
            None => IdentityStore::new(),
        };

        Some(Self {
            config,
            client: reqwest::Client::new(),
            identity,
            reconciler: Arc::new(MessageReconciler::new()),
            session: tokio::sync::Mutex::new(ConversationSession::new()),
            stream: Mutex::new(None),
            sender: Mutex::new(None),
        })
    }

    /// Resolve the visitor identity, negotiate the conversation, and open
    /// the push channel.
    ///
    /// Idempotent: the session is created exactly once per widget instance,
    /// so repeated calls (e.g. the embed script evaluated twice) are no-ops.
    /// That includes calls after a bootstrap failure, which leaves messaging
    /// unavailable until the page is reloaded.
    pub async fn start(&self) -> SessionStatus {
        let mut session = self.session.lock().await;
        if session.status != SessionStatus::Uninitialized {
            warn!(status = ?session.status, "widget already started; ignoring");
            return session.status;
        }

        let visitor_id = self.identity.get_or_create();
        let conversation = ConversationClient::new(
            self.client.clone(),
            self.config.api_base_url.clone(),
            self.config.tenant_id.clone(),
        );

        if conversation.start(&mut session, &visitor_id).await.is_err() {
            // Fatal to the session; already logged at the boundary.
            return session.status;
        }

        let conversation_id = session
            .conversation_id
            .clone()
            .expect("active session has a conversation id");
        info!(%conversation_id, "widget session active");

        let stream = Arc::new(StreamManager::new(
            self.client.clone(),
            self.config.api_base_url.clone(),
            self.config.tenant_id.clone(),
            conversation_id.clone(),
            self.config.retry,
            Arc::clone(&self.reconciler),
        ));
        Arc::clone(&stream).connect();
        *self.stream.lock().expect("stream slot lock poisoned") = Some(stream);

        let sender = Arc::new(OutboundSender::new(
            self.client.clone(),
            self.config.api_base_url.clone(),
            self.config.tenant_id.clone(),
            conversation_id,
            visitor_id,
            Arc::clone(&self.reconciler),
        ));
        *self.sender.lock().expect("sender slot lock poisoned") = Some(sender);

        session.status
    }

    /// Send a visitor message. A no-op (logged) when the session never
    /// became active; empty input is silently ignored.
    pub async fn send(&self, text: &str) {
        let sender = self
            .sender
            .lock()
            .expect("sender slot lock poisoned")
            .clone();
        match sender {
            Some(sender) => sender.send(text).await,
            None => warn!("message dropped; conversation is not active"),
        }
    }

    /// Ordered, duplicate-free timeline for the display layer.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.reconciler.messages()
    }

    /// Current session status.
    pub async fn status(&self) -> SessionStatus {
        self.session.lock().await.status
    }

    /// Current push-channel state (`Closed` before start/after teardown).
    pub fn stream_state(&self) -> StreamState {
        self.stream
            .lock()
            .expect("stream slot lock poisoned")
            .as_ref()
            .map(|s| s.state())
            .unwrap_or(StreamState::Closed)
    }

    /// Display hint from the embed configuration.
    pub fn primary_color(&self) -> Option<&str> {
        self.config.primary_color.as_deref()
    }

    /// Close the push channel deterministically (page unload). No further
    /// reconnect is scheduled afterwards. Idempotent.
    pub fn teardown(&self) {
        if let Some(stream) = self
            .stream
            .lock()
            .expect("stream slot lock poisoned")
            .as_ref()
        {
            stream.shutdown();
        }
    }
}
