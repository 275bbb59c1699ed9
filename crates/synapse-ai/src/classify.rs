//! Maps provider faults onto [`ErrorKind`].
//!
//! Classification is an ordered list of substring rules over the lower-cased
//! fault message. The first rule with a matching token wins, so a message
//! mentioning both `401` and `network` is an auth failure.

use tracing::debug;

use crate::{AiError, ErrorKind};

/// Detail used when a fault carries no message at all.
pub const UNKNOWN_FALLBACK: &str = "An unexpected error occurred during the conversation.";

const RULES: &[(ErrorKind, &[&str])] = &[
    (
        ErrorKind::AuthFailure,
        &[
            "api key",
            "api_key",
            "401",
            "403",
            "unauthenticated",
            "permission denied",
            "permission_denied",
        ],
    ),
    (
        ErrorKind::QuotaExceeded,
        &[
            "quota",
            "429",
            "resource exhausted",
            "resource_exhausted",
            "rate limit",
        ],
    ),
    (
        ErrorKind::ServiceUnavailable,
        &["503", "overloaded", "unavailable"],
    ),
    (
        ErrorKind::NetworkFailure,
        &["fetch failed", "network", "connection", "timed out"],
    ),
];

/// A failure raised below the session boundary, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Already classified; passes through untouched.
    Classified(AiError),
    /// Opaque provider or transport failure.
    Raw {
        status: Option<u16>,
        message: String,
    },
}

impl Fault {
    pub fn raw(message: impl Into<String>) -> Self {
        Self::Raw {
            status: None,
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Raw {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl From<AiError> for Fault {
    fn from(err: AiError) -> Self {
        Self::Classified(err)
    }
}

/// Classify a bare message. Never returns `InvalidInput` or
/// `MalformedResponse`; those only originate locally.
pub fn classify_message(message: &str) -> ErrorKind {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|(_, tokens)| tokens.iter().any(|token| lowered.contains(token)))
        .map(|(kind, _)| *kind)
        .unwrap_or(ErrorKind::Unknown)
}

/// Turn a fault into exactly one classified error.
pub fn classify(fault: Fault) -> AiError {
    match fault {
        Fault::Classified(err) => err,
        Fault::Raw { status, message } => {
            let probe = match status {
                Some(code) => format!("{code} {message}"),
                None => message.clone(),
            };
            let kind = classify_message(&probe);
            debug!(%kind, ?status, "classified provider fault");

            let detail = if message.trim().is_empty() {
                match status {
                    Some(code) => format!("HTTP {code}"),
                    None => UNKNOWN_FALLBACK.to_string(),
                }
            } else {
                message
            };
            AiError::new(kind, detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_table() {
        let cases = [
            ("API key not valid. Please pass a valid API key.", ErrorKind::AuthFailure),
            ("HTTP 403 Forbidden", ErrorKind::AuthFailure),
            ("Request had invalid authentication credentials: UNAUTHENTICATED", ErrorKind::AuthFailure),
            ("PERMISSION_DENIED: caller lacks access", ErrorKind::AuthFailure),
            ("You exceeded your current quota", ErrorKind::QuotaExceeded),
            ("HTTP 429: RESOURCE_EXHAUSTED", ErrorKind::QuotaExceeded),
            ("Resource exhausted", ErrorKind::QuotaExceeded),
            ("The model is overloaded. Please try again later.", ErrorKind::ServiceUnavailable),
            ("HTTP 503 Service Unavailable", ErrorKind::ServiceUnavailable),
            ("TypeError: fetch failed", ErrorKind::NetworkFailure),
            ("network error: connection refused", ErrorKind::NetworkFailure),
            ("operation timed out", ErrorKind::NetworkFailure),
            ("something odd happened", ErrorKind::Unknown),
            ("", ErrorKind::Unknown),
        ];
        for (message, expected) in cases {
            assert_eq!(classify_message(message), expected, "message: {message:?}");
        }
    }

    #[test]
    fn auth_rule_precedes_network_rule() {
        assert_eq!(
            classify_message("network proxy returned 401"),
            ErrorKind::AuthFailure
        );
    }

    #[test]
    fn quota_rule_precedes_unavailable_rule() {
        assert_eq!(
            classify_message("429 quota exceeded, service unavailable"),
            ErrorKind::QuotaExceeded
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(classify_message("NETWORK DOWN"), ErrorKind::NetworkFailure);
        assert_eq!(classify_message("Overloaded"), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn classified_faults_pass_through() {
        let original = AiError::MalformedResponse("api key mentioned in payload".into());
        assert_eq!(classify(Fault::from(original.clone())), original);

        let original = AiError::InvalidInput("nothing to send".into());
        assert_eq!(classify(original.clone().into()), original);
    }

    #[test]
    fn status_code_participates_in_matching() {
        let err = classify(Fault::http(503, "try again later"));
        assert_eq!(err, AiError::ServiceUnavailable("try again later".into()));
    }

    #[test]
    fn unknown_keeps_message_verbatim() {
        let err = classify(Fault::raw("Socket Hang Up"));
        assert_eq!(err, AiError::Unknown("Socket Hang Up".into()));
    }

    #[test]
    fn empty_message_gets_fallback_detail() {
        assert_eq!(
            classify(Fault::raw("")),
            AiError::Unknown(UNKNOWN_FALLBACK.into())
        );
        assert_eq!(
            classify(Fault::http(401, " ")),
            AiError::AuthFailure("HTTP 401".into())
        );
    }
}
