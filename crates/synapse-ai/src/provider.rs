//! The seam between a session and the remote model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::prompt::Part;
use crate::Fault;

/// Finish reason reported for a normal completion.
pub const FINISH_STOP: &str = "STOP";

/// Speaker of one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One turn of dialogue history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Role::User,
            parts,
        }
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::text(text)],
        }
    }
}

/// Everything a provider needs for one completion. Providers are stateless;
/// the session supplies the full history on every call.
#[derive(Debug, Clone)]
pub struct GenerateCall<'a> {
    pub model: &'a str,
    pub system_instruction: &'a str,
    pub contents: &'a [Content],
    /// Extended-deliberation budget; 0 turns it off.
    pub thinking_budget: u32,
    /// Present for structured requests: the reply must match this shape.
    pub response_schema: Option<&'a serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// A transport-level success. The text may still violate the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderReply {
    pub text: String,
    pub finish_reason: Option<String>,
    pub usage: TokenUsage,
}

impl ProviderReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: Some(FINISH_STOP.to_string()),
            usage: TokenUsage::default(),
        }
    }
}

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    async fn generate(&self, call: &GenerateCall<'_>) -> Result<ProviderReply, Fault>;
}
