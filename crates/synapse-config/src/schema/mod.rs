//! Configuration schema types for Synapse.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod network;
mod provider;
mod session;

pub use logging::*;
pub use network::*;
pub use provider::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Synapse.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SynapseConfig {
    pub provider: ProviderConfig,
    pub session: SessionSettings,
    pub network: NetworkConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_provider() {
        let config = SynapseConfig::default();
        assert_eq!(config.provider.model, "gemini-3-flash-preview");
        assert_eq!(config.provider.api_key_env, "GEMINI_API_KEY");
        assert!(config.provider.base_url.starts_with("https://"));
    }

    #[test]
    fn default_session_disables_deliberation() {
        let config = SynapseConfig::default();
        assert_eq!(config.session.variant, SessionVariant::Assistant);
        assert_eq!(config.session.thinking_budget, 0);
        assert!(config.session.system_instruction.is_none());
    }

    #[test]
    fn default_network_policy() {
        let config = SynapseConfig::default();
        assert_eq!(config.network.request_timeout(), Duration::from_secs(120));
        assert_eq!(config.network.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.network.max_retries, 1);
        assert_eq!(config.network.retry_backoff(), Duration::from_millis(500));
    }

    #[test]
    fn variant_parses_lowercase() {
        let settings: SessionSettings = toml::from_str("variant = \"organizer\"").unwrap();
        assert_eq!(settings.variant, SessionVariant::Organizer);
    }

    #[test]
    fn log_level_directive() {
        assert_eq!(LogLevel::default().as_directive(), "info");
        let logging: LoggingConfig = toml::from_str("level = \"warn\"").unwrap();
        assert_eq!(logging.level.as_directive(), "warn");
    }
}
