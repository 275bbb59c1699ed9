//! Synapse configuration system.
//!
//! TOML-based configuration for the provider, the conversation session,
//! network policy and logging. All sections use sensible defaults so
//! partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    LogLevel, LoggingConfig, NetworkConfig, ProviderConfig, SessionSettings, SessionVariant,
    SynapseConfig,
};

use std::path::Path;

use synapse_common::ConfigError;

/// Load and validate config from the platform default path, creating a
/// default file if none exists.
pub fn load_config() -> Result<SynapseConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<SynapseConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nthinking_budget = 99999\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("session.thinking_budget"));
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = SynapseConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: SynapseConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
