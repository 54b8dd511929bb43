//! # Storefront Contract CLI
//!
//! Exercises the API contract from the command line.
//!
//! ## Usage
//! ```bash
//! # Describe the version policy
//! cargo run -p storefront-api -- info
//!
//! # Check a version token
//! cargo run -p storefront-api -- check v2
//!
//! # Classify a failure message
//! cargo run -p storefront-api -- classify "User not found with id: 999"
//!
//! # Use a specific config file
//! cargo run -p storefront-api -- --config ./storefront.toml check 3
//! ```
//!
//! Prints the JSON envelope on stdout. Exit code 0 for SUCCESS, 1 for an
//! error envelope, 2 for usage or configuration problems.

use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;
use storefront_api::config::LOG_FILTER_ENV;
use storefront_api::{
    init_tracing, AppConfig, AppError, AppResult, AppState, LoggingSettings, Reply,
};
use tracing::{error, info};

const USAGE: &str = "usage: storefront [--config PATH] <info | check TOKEN | classify MESSAGE...>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Info,
    Check(String),
    Classify(String),
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (config_path, command) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let logs = init_tracing(&startup_filter());

    let config = match AppConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return ExitCode::from(2);
        }
    };

    if let Some(logs) = &logs {
        logs.apply(&config.logging.filter);
    }
    info!("Starting storefront contract CLI");

    match run(config, command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::from(2)
        }
    }
}

/// Filter used while the configuration loads.
fn startup_filter() -> String {
    std::env::var(LOG_FILTER_ENV).unwrap_or_else(|_| LoggingSettings::default().filter)
}

fn parse_args(args: &[String]) -> AppResult<(Option<PathBuf>, Command)> {
    let mut config_path = None;
    let mut i = 0;

    while i < args.len() && args[i] == "--config" {
        let path = args
            .get(i + 1)
            .ok_or_else(|| AppError::Usage("--config requires a path".to_string()))?;
        config_path = Some(PathBuf::from(path));
        i += 2;
    }

    let rest = &args[i..];
    let command = match rest.first().map(String::as_str) {
        Some("info") => Command::Info,
        Some("check") => Command::Check(rest.get(1).cloned().unwrap_or_default()),
        Some("classify") => Command::Classify(rest[1..].join(" ")),
        Some(other) => return Err(AppError::Usage(format!("unknown command '{}'", other))),
        None => return Err(AppError::Usage("missing command".to_string())),
    };

    Ok((config_path, command))
}

/// Runs a command; returns whether the printed envelope is a success.
fn run(config: AppConfig, command: Command) -> AppResult<bool> {
    let state = AppState::from_config(config)?;

    match command {
        Command::Info => {
            let response = state.gate.info();
            print_json(&response)?;
            Ok(response.is_success())
        }
        Command::Check(token) => {
            let reply = state.gate.compatibility(&token);
            print_json(&reply)?;
            Ok(reply.body.is_success())
        }
        Command::Classify(message) => {
            let reply: Reply<()> = state.failures.handle_message(&message);
            print_json(&reply)?;
            Ok(reply.body.is_success())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
