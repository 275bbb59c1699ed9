//! Conversation session management.
//!
//! A [`SessionGateway`] owns one [`ConversationSession`]: the instruction,
//! deliberation budget and response contract fixed at `start()`, plus the
//! dialogue history that successful `send()` calls append to.

mod chat;
mod instructions;
mod manager;
mod types;


pub use instructions::{ASSISTANT_INSTRUCTION, ORGANIZER_INSTRUCTION};
pub use manager::SessionGateway;
pub use types::{ConversationSession, Reply, ResponseContract, SessionConfig, SessionState};
