//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Synapse Configuration
# Only override what you want to change -- missing fields use defaults.

[provider]
# model = "gemini-3-flash-preview"
# base_url = "https://generativelanguage.googleapis.com/v1beta/models"
# api_key_env = "GEMINI_API_KEY"   # API_KEY is tried when this is unset

[session]
# variant = "assistant"            # assistant | organizer
# thinking_budget = 0              # 0-24576, 0 disables extended deliberation
# system_instruction = "..."       # replaces the built-in instruction

[network]
# connect_timeout_secs = 10        # 1-120
# request_timeout_secs = 120       # 1-600
# max_retries = 1                  # 0-5, only for unavailable/network failures
# retry_backoff_ms = 500           # 0-60000

[logging]
# level = "info"                   # trace | debug | info | warn | error
"##
}
