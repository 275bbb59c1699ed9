//! Interactive line loop and one-shot sending.

use std::io::Write;
use std::path::PathBuf;

use synapse_ai::{assemble, Attachment, ModeFlags, SessionGateway};
use synapse_common::SynapseError;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::attachments::load_attachment;
use crate::render::{render_error, render_reply};

const HELP: &str = "\
Commands:
  /new          start a fresh session (forgets the conversation)
  /live         toggle live mode (short answers)
  /attach PATH  attach a file to the next message
  /help         show this help
  /quit         exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    ToggleLive,
    Attach(PathBuf),
    Help,
    Quit,
    Message(String),
    Empty,
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(h, r)| (h, r.trim()))
        .unwrap_or((line, ""));
    match head {
        "/new" => Command::New,
        "/live" => Command::ToggleLive,
        "/attach" if !rest.is_empty() => Command::Attach(PathBuf::from(rest)),
        "/attach" | "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Message(line.to_string()),
    }
}

/// Assemble and send one message, printing the reply or the error.
/// Returns whether the exchange succeeded.
pub async fn send_once(
    gateway: &mut SessionGateway,
    text: &str,
    attachments: &[Attachment],
    flags: ModeFlags,
) -> bool {
    let result = match assemble(text, attachments, flags) {
        Ok(request) => gateway.send(request).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(reply) => {
            println!("{}", render_reply(&reply));
            true
        }
        Err(err) => {
            eprintln!("{}", render_error(&err));
            false
        }
    }
}

/// Read commands and messages from stdin until EOF or `/quit`.
pub async fn run(gateway: &mut SessionGateway, mut flags: ModeFlags) -> Result<(), SynapseError> {
    gateway.start();
    println!("Synapse ready. Type /help for commands.");

    let mut pending: Vec<Attachment> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", if flags.live { "live> " } else { "> " });
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::New => {
                gateway.start();
                pending.clear();
                println!("Started a new session.");
            }
            Command::ToggleLive => {
                flags.live = !flags.live;
                println!("Live mode {}.", if flags.live { "on" } else { "off" });
            }
            Command::Attach(path) => match load_attachment(&path) {
                Ok(attachment) => {
                    println!("Attached {} ({}).", attachment.name, attachment.mime_type);
                    pending.push(attachment);
                }
                Err(e) => eprintln!("{e}"),
            },
            Command::Message(text) => {
                send_once(gateway, &text, &pending, flags).await;
                pending.clear();
            }
        }
    }

    tracing::info!(
        calls = gateway.usage().call_count(),
        tokens = gateway.usage().total_tokens(),
        "session closed"
    );
    Ok(())
}
