//! Outbound prompt assembly.
//!
//! Turns raw user text, attachments and mode flags into an ordered list of
//! request parts. Pure: no I/O, no clock, no randomness.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::AiError;

/// Tag prepended in live (terse) mode.
pub const LIVE_TAG: &str = "[LIVE]";
/// Tag prepended when the text asks for a translation.
pub const TRANSLATE_TAG: &str = "[TRANSLATE]";
/// Case-insensitive keyword that triggers [`TRANSLATE_TAG`].
pub const TRANSLATE_KEYWORD: &str = "translate";
/// End of a data-URL header such as `data:image/png;base64,`.
pub const ENCODING_MARKER: &str = "base64,";

/// A user-supplied file: display name, media type, base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    /// Base64 text, optionally behind a data-URL header.
    pub data: String,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode raw file bytes.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(name, mime_type, B64.encode(bytes))
    }

    /// The payload with any encoding header stripped.
    pub fn payload(&self) -> &str {
        match self.data.split_once(ENCODING_MARKER) {
            Some((_, rest)) => rest,
            None => &self.data,
        }
    }
}

/// Ambient operating mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    /// Terse, conversational replies.
    pub live: bool,
}

impl ModeFlags {
    pub fn live() -> Self {
        Self { live: true }
    }
}

/// One element of an outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Binary { mime_type: String, payload: String },
    Text { value: String },
}

impl Part {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { value } => Some(value),
            Self::Binary { .. } => None,
        }
    }
}

/// Parts ready to send: binary parts first, then at most one text part.
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundRequest {
    parts: Vec<Part>,
}

impl OutboundRequest {
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    /// The text part, if the request has one.
    pub fn text(&self) -> Option<&str> {
        self.parts.iter().find_map(Part::as_text)
    }

    pub fn binary_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, Part::Binary { .. }))
            .count()
    }
}

/// Prepend mode tags. The live tag goes on first so a translation request
/// in live mode reads `[TRANSLATE] [LIVE] ...`.
pub fn apply_mode_tags(text: &str, flags: ModeFlags) -> String {
    let mut tagged = if flags.live {
        format!("{LIVE_TAG} {text}")
    } else {
        text.to_string()
    };
    if tagged.to_lowercase().contains(TRANSLATE_KEYWORD) {
        tagged = format!("{TRANSLATE_TAG} {tagged}");
    }
    tagged
}

/// Build an [`OutboundRequest`].
///
/// Fails with `InvalidInput` when there is neither text nor an attachment,
/// or when an attachment carries no payload.
pub fn assemble(
    text: &str,
    attachments: &[Attachment],
    flags: ModeFlags,
) -> Result<OutboundRequest, AiError> {
    let has_text = !text.trim().is_empty();
    if !has_text && attachments.is_empty() {
        return Err(AiError::InvalidInput(
            "enter a message or attach a file".into(),
        ));
    }

    let mut parts = Vec::with_capacity(attachments.len() + 1);
    for attachment in attachments {
        let payload = attachment.payload();
        if payload.is_empty() {
            return Err(AiError::InvalidInput(format!(
                "attachment {:?} has no content",
                attachment.name
            )));
        }
        parts.push(Part::Binary {
            mime_type: attachment.mime_type.clone(),
            payload: payload.to_string(),
        });
    }

    // An attachment-only message in live mode still carries the live tag.
    let tagged = apply_mode_tags(text, flags);
    if !tagged.trim().is_empty() {
        parts.push(Part::text(tagged));
    }

    Ok(OutboundRequest { parts })
}
