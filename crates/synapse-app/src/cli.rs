use std::path::PathBuf;

use clap::Parser;

/// Synapse: a terminal front end for a hosted Gemini model, as a chat
/// assistant or a notes organizer.
#[derive(Parser, Debug)]
#[command(name = "synapse", version, about)]
pub struct Args {
    /// Message to send. Without a message or attachment, an interactive
    /// session starts on stdin.
    pub message: Option<String>,

    /// Attach a file (repeatable).
    #[arg(short = 'a', long = "attach", value_name = "FILE")]
    pub attach: Vec<PathBuf>,

    /// Live mode: short, conversational answers.
    #[arg(long)]
    pub live: bool,

    /// Organize notes into projects, people, decisions and tasks.
    #[arg(long)]
    pub organize: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn is_one_shot(&self) -> bool {
        self.message.is_some() || !self.attach.is_empty()
    }
}

pub fn parse() -> Args {
    Args::parse()
}
