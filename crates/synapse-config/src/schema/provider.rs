//! Remote model provider settings.

use serde::{Deserialize, Serialize};
use synapse_common::ConfigError;

/// Environment variable consulted when `api_key_env` is unset in the process.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Which model to talk to and where the credential comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProviderConfig {
    pub model: String,
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            api_key_env: "GEMINI_API_KEY".into(),
        }
    }
}

impl ProviderConfig {
    /// Read the API key from `api_key_env`, then from `API_KEY`.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_api_key_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ConfigError> {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| lookup(name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or_else(|| {
                ConfigError::MissingCredential(format!(
                    "set {} or {FALLBACK_API_KEY_ENV}",
                    self.api_key_env
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_configured_variable() {
        let config = ProviderConfig::default();
        let key = config
            .resolve_api_key_with(|name| match name {
                "GEMINI_API_KEY" => Some("primary".into()),
                "API_KEY" => Some("fallback".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(key, "primary");
    }

    #[test]
    fn falls_back_to_api_key() {
        let config = ProviderConfig::default();
        let key = config
            .resolve_api_key_with(|name| (name == "API_KEY").then(|| "fallback".into()))
            .unwrap();
        assert_eq!(key, "fallback");
    }

    #[test]
    fn blank_key_is_missing() {
        let config = ProviderConfig::default();
        let err = config
            .resolve_api_key_with(|_| Some("   ".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
