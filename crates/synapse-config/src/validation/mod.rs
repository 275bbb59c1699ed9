//! Full configuration validation.
//!
//! Validates numeric ranges and required strings, collecting every problem
//! into a single `ConfigError`.

mod helpers;


use crate::schema::SynapseConfig;
use synapse_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SynapseConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_provider(&mut errors, config);
    validate_session(&mut errors, config);
    validate_network(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_provider(errors: &mut Vec<String>, config: &SynapseConfig) {
    validate_non_empty(errors, "provider.model", &config.provider.model);
    validate_non_empty(errors, "provider.api_key_env", &config.provider.api_key_env);
    let base_url = &config.provider.base_url;
    if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        errors.push(format!("provider.base_url = {base_url:?} must be an http(s) URL"));
    }
}

fn validate_session(errors: &mut Vec<String>, config: &SynapseConfig) {
    validate_range(
        errors,
        "session.thinking_budget",
        config.session.thinking_budget,
        0,
        24576,
    );
    if let Some(instruction) = &config.session.system_instruction {
        validate_non_empty(errors, "session.system_instruction", instruction);
    }
}

fn validate_network(errors: &mut Vec<String>, config: &SynapseConfig) {
    validate_range(
        errors,
        "network.connect_timeout_secs",
        config.network.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "network.request_timeout_secs",
        config.network.request_timeout_secs,
        1,
        600,
    );
    validate_range(errors, "network.max_retries", config.network.max_retries, 0, 5);
    validate_range(
        errors,
        "network.retry_backoff_ms",
        config.network.retry_backoff_ms,
        0,
        60_000,
    );
}
