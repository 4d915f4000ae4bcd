//! Configuration loading and management.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::cache::DEFAULT_BAN_SECS;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Daemon configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Administrative interface configuration.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Ban cache behavior.
    #[serde(default)]
    pub bans: BanConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Instance name used in log output (e.g., "edge-1").
    #[serde(default = "default_server_name")]
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

/// Administrative interface configuration.
///
/// The CLI reads the same file to locate the daemon, so `listen` doubles as
/// the client's connect address.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Address the admin listener binds to (default: 127.0.0.1:4680).
    #[serde(default = "default_admin_listen")]
    pub listen: SocketAddr,
    /// Per-request timeout applied by the CLI client, in seconds (default: 5).
    #[serde(default = "default_client_timeout")]
    pub client_timeout_secs: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            listen: default_admin_listen(),
            client_timeout_secs: default_client_timeout(),
        }
    }
}

/// Ban cache behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BanConfig {
    /// Ban duration applied when a `ban` command carries none (default: 86400).
    #[serde(default = "default_ban_duration")]
    pub default_duration_secs: u64,
    /// Interval between background expiry sweeps, in seconds (default: 60).
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for BanConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: default_ban_duration(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_server_name() -> String {
    "bancached".to_string()
}

fn default_admin_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 4680))
}

fn default_client_timeout() -> u64 {
    5
}

fn default_ban_duration() -> u64 {
    DEFAULT_BAN_SECS
}

fn default_sweep_interval() -> u64 {
    60
}
