//! SessionGateway struct and session lifecycle.

use std::sync::Arc;

use tracing::info;

use crate::provider::{Content, ModelProvider};
use crate::token_tracker::TokenTracker;

use super::types::{ConversationSession, SessionConfig, SessionState};

/// Owns one conversation with a remote model.
///
/// `send` takes `&mut self`, so a gateway never has two requests in
/// flight. Separate gateways share nothing but the provider and can run
/// in parallel.
pub struct SessionGateway {
    pub(super) provider: Arc<dyn ModelProvider>,
    pub(super) config: SessionConfig,
    pub(super) session: Option<ConversationSession>,
    pub(super) tracker: TokenTracker,
}

impl SessionGateway {
    pub fn new(provider: Arc<dyn ModelProvider>, config: SessionConfig) -> Self {
        Self {
            provider,
            config,
            session: None,
            tracker: TokenTracker::new(),
        }
    }

    /// Open a fresh session, discarding the previous one and its history.
    pub fn start(&mut self) -> &ConversationSession {
        if let Some(old) = &self.session {
            info!(
                session = %old.id().short(),
                turns = old.turn_count(),
                "discarding session"
            );
        }
        self.tracker.reset();
        let session = self.session.insert(ConversationSession::open(&self.config));
        info!(
            session = %session.id().short(),
            provider = self.provider.name(),
            model = %self.config.model,
            contract = ?session.contract(),
            "session started"
        );
        session
    }

    pub fn state(&self) -> SessionState {
        match self.session {
            Some(_) => SessionState::Active,
            None => SessionState::Uninitialized,
        }
    }

    pub fn session(&self) -> Option<&ConversationSession> {
        self.session.as_ref()
    }

    /// Dialogue history of the active session; empty when uninitialized.
    pub fn history(&self) -> &[Content] {
        self.session
            .as_ref()
            .map(ConversationSession::history)
            .unwrap_or_default()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Token usage since the last `start()`.
    pub fn usage(&self) -> &TokenTracker {
        &self.tracker
    }
}
