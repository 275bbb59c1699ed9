//! Conversation session settings.

use serde::{Deserialize, Serialize};

/// Product variant: decides the response contract and built-in instruction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionVariant {
    /// Conversational assistant, free-text replies.
    #[default]
    Assistant,
    /// Notes organizer, replies must match the four-collection record.
    Organizer,
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionSettings {
    pub variant: SessionVariant,
    /// Extended-deliberation budget in tokens (valid range: 0-24576, 0 disables it).
    pub thinking_budget: u32,
    /// Replaces the built-in instruction for the selected variant.
    pub system_instruction: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            variant: SessionVariant::Assistant,
            thinking_budget: 0,
            system_instruction: None,
        }
    }
}
