//! The closed error taxonomy every failed call is reported in.

use std::fmt;

use serde::Serialize;

/// Kind of a failed call. Closed set; the front end renders one of these
/// plus the detail string and takes no corrective action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    AuthFailure,
    QuotaExceeded,
    ServiceUnavailable,
    NetworkFailure,
    MalformedResponse,
    Unknown,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        Self::InvalidInput,
        Self::AuthFailure,
        Self::QuotaExceeded,
        Self::ServiceUnavailable,
        Self::NetworkFailure,
        Self::MalformedResponse,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::AuthFailure => "auth_failure",
            Self::QuotaExceeded => "quota_exceeded",
            Self::ServiceUnavailable => "service_unavailable",
            Self::NetworkFailure => "network_failure",
            Self::MalformedResponse => "malformed_response",
            Self::Unknown => "unknown",
        }
    }

    /// Whether another attempt of the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable | Self::NetworkFailure)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure: one variant per [`ErrorKind`], each with a
/// human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("authentication failed: {0}")]
    AuthFailure(String),
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("network failure: {0}")]
    NetworkFailure(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    Unknown(String),
}

impl AiError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match kind {
            ErrorKind::InvalidInput => Self::InvalidInput(detail),
            ErrorKind::AuthFailure => Self::AuthFailure(detail),
            ErrorKind::QuotaExceeded => Self::QuotaExceeded(detail),
            ErrorKind::ServiceUnavailable => Self::ServiceUnavailable(detail),
            ErrorKind::NetworkFailure => Self::NetworkFailure(detail),
            ErrorKind::MalformedResponse => Self::MalformedResponse(detail),
            ErrorKind::Unknown => Self::Unknown(detail),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::AuthFailure(_) => ErrorKind::AuthFailure,
            Self::QuotaExceeded(_) => ErrorKind::QuotaExceeded,
            Self::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            Self::NetworkFailure(_) => ErrorKind::NetworkFailure,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidInput(d)
            | Self::AuthFailure(d)
            | Self::QuotaExceeded(d)
            | Self::ServiceUnavailable(d)
            | Self::NetworkFailure(d)
            | Self::MalformedResponse(d)
            | Self::Unknown(d) => d,
        }
    }
}
