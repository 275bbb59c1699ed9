mod attachments;
mod cli;
mod render;
mod repl;

use std::process::ExitCode;
use std::sync::Arc;

use synapse_ai::{GeminiClient, GeminiConfig, ModeFlags, SessionConfig, SessionGateway};
use synapse_common::SynapseError;
use synapse_config::{LogLevel, SessionVariant, SynapseConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Load environment variables from a `.env` file (KEY=VALUE lines) in the
/// working directory. Variables already set win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn filter_directives(level: &str) -> String {
    format!("warn,synapse={level},synapse_ai={level},synapse_config={level}")
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(level)).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the subscriber before config loading so its events are kept.
/// Returns a handle when neither `RUST_LOG` nor `--log-level` pinned the
/// filter, so `logging.level` can still be applied.
fn init_logging(cli_level: Option<&str>) -> Option<FilterHandle> {
    let (filter, pinned) = match (EnvFilter::try_from_default_env(), cli_level) {
        (Ok(filter), _) => (filter, true),
        (Err(_), Some(level)) => (level_filter(level), true),
        (Err(_), None) => (level_filter(LogLevel::default().as_directive()), false),
    };
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    (!pinned).then_some(handle)
}

fn apply_config_level(handle: Option<FilterHandle>, config: &SynapseConfig) {
    let Some(handle) = handle else {
        return;
    };
    let level = config.logging.level.as_directive();
    if let Err(e) = handle.reload(level_filter(level)) {
        tracing::warn!("Failed to apply log level {level}: {e}");
    }
}

fn load_config(args: &cli::Args) -> Result<SynapseConfig, SynapseError> {
    let config = match &args.config {
        Some(path) => synapse_config::load_config_from(path)?,
        None => synapse_config::load_config()?,
    };
    Ok(config)
}

/// Map file settings (and the `--organize` switch) onto a session config.
fn session_config(config: &SynapseConfig, organize: bool) -> SessionConfig {
    let model = config.provider.model.clone();
    let variant = if organize {
        SessionVariant::Organizer
    } else {
        config.session.variant
    };
    let mut session = match variant {
        SessionVariant::Assistant => SessionConfig::assistant(model),
        SessionVariant::Organizer => SessionConfig::organizer(model),
    };
    if let Some(instruction) = &config.session.system_instruction {
        session = session.with_system_instruction(instruction.clone());
    }
    session
        .with_thinking_budget(config.session.thinking_budget)
        .with_request_timeout(config.network.request_timeout())
        .with_retries(config.network.max_retries, config.network.retry_backoff())
}

fn build_gateway(config: &SynapseConfig, organize: bool) -> Result<SessionGateway, SynapseError> {
    let api_key = config.provider.resolve_api_key()?;
    let client = GeminiClient::new(
        GeminiConfig::new(api_key)
            .with_base_url(config.provider.base_url.clone())
            .with_connect_timeout(config.network.connect_timeout())
            .with_request_timeout(config.network.request_timeout()),
    )
    .map_err(|e| SynapseError::Ai(e.to_string()))?;

    Ok(SessionGateway::new(
        Arc::new(client),
        session_config(config, organize),
    ))
}

async fn run(args: cli::Args, config: SynapseConfig) -> Result<ExitCode, SynapseError> {
    let mut gateway = build_gateway(&config, args.organize)?;
    let flags = ModeFlags { live: args.live };

    if args.is_one_shot() {
        let attachments = attachments::load_all(args.attach.as_slice())?;
        let text = args.message.as_deref().unwrap_or_default();
        let ok = repl::send_once(&mut gateway, text, &attachments, flags).await;
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    repl::run(&mut gateway, flags).await?;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();

    let args = cli::parse();

    let log_handle = init_logging(args.log_level.as_deref());

    let (config, config_error) = match load_config(&args) {
        Ok(config) => (config, None),
        Err(e) => (SynapseConfig::default(), Some(e)),
    };
    apply_config_level(log_handle, &config);

    tracing::info!("Synapse v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        if args.config.is_some() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    match run(args, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
