//! Session configuration, state and reply types.

use std::time::Duration;

use synapse_common::SessionId;

use crate::provider::Content;
use crate::schema::{self, StructuredResult};

use super::instructions::{ASSISTANT_INSTRUCTION, ORGANIZER_INSTRUCTION};

/// What a successful reply must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseContract {
    /// Non-empty free text.
    Freeform,
    /// JSON matching [`StructuredResult`] exactly.
    Structured,
}

/// Settings a gateway stamps onto every session it starts.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub model: String,
    pub system_instruction: String,
    /// 0 disables extended deliberation.
    pub thinking_budget: u32,
    pub contract: ResponseContract,
    /// Upper bound for one provider call.
    pub request_timeout: Duration,
    /// Extra attempts after `ServiceUnavailable` or `NetworkFailure`.
    pub max_retries: u32,
    pub retry_backoff: Duration,
}

impl SessionConfig {
    fn base(model: impl Into<String>, instruction: &str, contract: ResponseContract) -> Self {
        Self {
            model: model.into(),
            system_instruction: instruction.to_string(),
            thinking_budget: 0,
            contract,
            request_timeout: Duration::from_secs(120),
            max_retries: 1,
            retry_backoff: Duration::from_millis(500),
        }
    }

    /// Conversational assistant with free-text replies.
    pub fn assistant(model: impl Into<String>) -> Self {
        Self::base(model, ASSISTANT_INSTRUCTION, ResponseContract::Freeform)
    }

    /// Notes organizer with structured replies.
    pub fn organizer(model: impl Into<String>) -> Self {
        Self::base(model, ORGANIZER_INSTRUCTION, ResponseContract::Structured)
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = budget;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retries(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = backoff;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active,
}

/// One conversation: the settings fixed at `start()` plus the dialogue so far.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    pub(super) id: SessionId,
    pub(super) system_instruction: String,
    pub(super) thinking_budget: u32,
    pub(super) contract: ResponseContract,
    pub(super) response_schema: Option<serde_json::Value>,
    pub(super) history: Vec<Content>,
}

impl ConversationSession {
    pub(super) fn open(config: &SessionConfig) -> Self {
        let response_schema = match config.contract {
            ResponseContract::Structured => Some(schema::response_schema()),
            ResponseContract::Freeform => None,
        };
        Self {
            id: SessionId::new(),
            system_instruction: config.system_instruction.clone(),
            thinking_budget: config.thinking_budget,
            contract: config.contract,
            response_schema,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn thinking_budget(&self) -> u32 {
        self.thinking_budget
    }

    pub fn contract(&self) -> ResponseContract {
        self.contract
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Completed exchanges (one user turn plus one model turn each).
    pub fn turn_count(&self) -> usize {
        self.history.len() / 2
    }
}

/// A reply that satisfied the session's contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Structured(StructuredResult),
}

impl Reply {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&StructuredResult> {
        match self {
            Self::Structured(result) => Some(result),
            Self::Text(_) => None,
        }
    }
}
