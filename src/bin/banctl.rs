//! banctl - one-shot administrative CLI for the bancached daemon.
//!
//! ```text
//! banctl [--config <path>] ban <ip> [seconds]   add a ban (default 86400s)
//! banctl [--config <path>] unban <ip>           lift an active ban
//! banctl [--config <path>] bans                 list active bans
//! banctl [--config <path>] check <ip>           query the request-path predicate
//! ```
//!
//! Exits 0 on success, 1 on any failure (unknown command, validation error,
//! infrastructure error). `unban` of an address with no active ban exits 1
//! with "no active ban".

use std::collections::VecDeque;
use std::net::IpAddr;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bancached::admin::{AdminClient, CommandOutcome};
use bancached::config::{Config, ConfigError};
use bancached::error::AdminError;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn usage() {
    eprintln!("usage: banctl [--config <path>] <ban <ip> [seconds] | unban <ip> | bans | check <ip>>");
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut args: VecDeque<String> = std::env::args().skip(1).collect();

    // Optional --config <path> ahead of the command. An explicitly named file
    // must exist; the default path silently falls back to built-in defaults.
    let mut config_path = DEFAULT_CONFIG_PATH.to_string();
    let mut config_explicit = false;
    if args.front().map(String::as_str) == Some("--config") {
        args.pop_front();
        match args.pop_front() {
            Some(path) => {
                config_path = path;
                config_explicit = true;
            }
            None => {
                usage();
                return ExitCode::FAILURE;
            }
        }
    }

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(ConfigError::Io(_)) if !config_explicit => Config::default(),
        Err(e) => {
            error!(path = %config_path, error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    let client = AdminClient::new(
        config.admin.listen,
        Duration::from_secs(config.admin.client_timeout_secs),
    );

    let Some(command) = args.pop_front() else {
        usage();
        return ExitCode::FAILURE;
    };

    let result = match command.as_str() {
        "ban" => {
            let Some(ip) = args.pop_front() else {
                usage();
                return ExitCode::FAILURE;
            };
            let duration_secs = match args.pop_front() {
                None => None,
                Some(raw) => match raw.parse::<i64>() {
                    Ok(secs) => Some(secs),
                    Err(_) => {
                        error!(input = %raw, "banning time must be an integer number of seconds");
                        return ExitCode::FAILURE;
                    }
                },
            };
            client.ban(&ip, duration_secs, None).await
        }
        "unban" => {
            let Some(ip) = args.pop_front() else {
                usage();
                return ExitCode::FAILURE;
            };
            client.unban(&ip).await
        }
        "bans" => return run_bans(&client).await,
        "check" => {
            let Some(raw) = args.pop_front() else {
                usage();
                return ExitCode::FAILURE;
            };
            let ip: IpAddr = match raw.parse() {
                Ok(ip) => ip,
                Err(_) => {
                    error!(input = %raw, "invalid IP address");
                    return ExitCode::FAILURE;
                }
            };
            return run_check(&client, &ip).await;
        }
        other => {
            error!(command = %other, "unknown command");
            usage();
            return ExitCode::FAILURE;
        }
    };

    report(result)
}

/// Map a command outcome (or infrastructure error) to log output and exit code.
fn report(result: Result<CommandOutcome, AdminError>) -> ExitCode {
    match result {
        Ok(outcome) if outcome.ok => {
            info!("{}", outcome.message);
            ExitCode::SUCCESS
        }
        Ok(outcome) => {
            error!("{}", outcome.message);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_bans(client: &AdminClient) -> ExitCode {
    match client.bans().await {
        Ok(entries) if entries.is_empty() => {
            // An empty list is a successful result, not an error.
            info!("no active bans");
            ExitCode::SUCCESS
        }
        Ok(entries) => {
            for ban in entries {
                match ban.reason {
                    Some(reason) => {
                        info!("{}  {}s remaining  ({reason})", ban.address, ban.remaining_secs);
                    }
                    None => info!("{}  {}s remaining", ban.address, ban.remaining_secs),
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_check(client: &AdminClient, ip: &IpAddr) -> ExitCode {
    match client.is_banned(ip).await {
        Ok(true) => {
            info!("{ip} is banned");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            info!("{ip} is not banned");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
