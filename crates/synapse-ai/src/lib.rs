//! Request/response layer between the Synapse front end and a hosted model.
//!
//! - [`prompt`]: assembles text, attachments and mode tags into a request
//! - [`session`]: owns the conversation and enforces the response contract
//! - [`classify`]: maps provider faults onto a closed set of error kinds
//! - [`gemini`]: the Gemini `generateContent` provider
//! - [`schema`]: the structured-notes record and its declared schema

pub mod classify;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod session;
pub mod token_tracker;

pub use classify::{classify, classify_message, Fault};
pub use error::{AiError, ErrorKind};
pub use gemini::{GeminiClient, GeminiConfig};
pub use prompt::{assemble, Attachment, ModeFlags, OutboundRequest, Part};
pub use provider::{
    Content, GenerateCall, ModelProvider, ProviderReply, Role, TokenUsage, FINISH_STOP,
};
pub use schema::StructuredResult;
pub use session::{
    ConversationSession, Reply, ResponseContract, SessionConfig, SessionGateway, SessionState,
};
pub use token_tracker::TokenTracker;
