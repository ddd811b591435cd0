mod args;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use love_core::{Love, LoveClient, LoveError, LoveStatus, Transport, UreqTransport, User};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command};

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    let transport = UreqTransport::new(args.timeout.map(Duration::from_secs));
    let client = LoveClient::with_transport(&args.api_key, &args.base_url, transport);
    debug!(base_url = client.base_url(), "client ready");

    match run(&client, args.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Execute one command and return what should be printed.
fn run<T: Transport>(client: &LoveClient<T>, command: Command) -> Result<String> {
    match command {
        Command::Send {
            sender,
            recipients,
            message,
        } => {
            client
                .send_love(&sender, &recipients, &message.join(" "))
                .map_err(explain)
                .with_context(|| format!("could not send love to {recipients}"))?;
            Ok(format!("Love sent to {recipients}!"))
        }
        Command::History {
            sender,
            recipient,
            limit,
            json,
        } => {
            let loves = client
                .get_love(&sender, &recipient, limit)
                .map_err(explain)
                .context("could not fetch love")?;
            if json {
                return Ok(serde_json::to_string_pretty(&loves)?);
            }
            Ok(format_loves(&loves))
        }
        Command::Autocomplete { term, json } => {
            let users = client
                .autocomplete(&term)
                .map_err(explain)
                .context("could not autocomplete")?;
            if json {
                return Ok(serde_json::to_string_pretty(&users)?);
            }
            Ok(format_users(&users))
        }
    }
}

/// Attach a hint for the statuses the love API documents.
fn explain(err: LoveError) -> anyhow::Error {
    let hint = match err.status() {
        Some(LoveStatus::Failed) => Some("the server refused this love"),
        Some(LoveStatus::BadParams) => Some("check the usernames and message"),
        _ => None,
    };
    match hint {
        Some(hint) => anyhow::Error::new(err).context(hint),
        None => err.into(),
    }
}

fn format_loves(loves: &[Love]) -> String {
    if loves.is_empty() {
        return "No love found.".to_string();
    }
    loves
        .iter()
        .map(|love| {
            format!(
                "{} {} -> {}: {}",
                love.timestamp.format("%Y-%m-%d %H:%M"),
                love.sender,
                love.recipient,
                love.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_users(users: &[User]) -> String {
    if users.is_empty() {
        return "No matching users.".to_string();
    }
    users
        .iter()
        .map(|user| format!("{}\t{}", user.username, user.display))
        .collect::<Vec<_>>()
        .join("\n")
}
