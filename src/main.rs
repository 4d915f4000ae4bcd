//! bancached - shared, time-bounded IP ban cache daemon.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bancached::admin::AdminListener;
use bancached::cache::{BanCache, spawn_sweep_task};
use bancached::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "failed to load config");
        e
    })?;

    info!(server = %config.server.name, "starting bancached");

    let cache = Arc::new(BanCache::new());

    // Expired entries are also filtered lazily on every read; the sweep only
    // bounds memory.
    spawn_sweep_task(
        Arc::clone(&cache),
        Duration::from_secs(config.bans.sweep_interval_secs),
    );
    info!(
        interval_secs = config.bans.sweep_interval_secs,
        "expiry sweep task started"
    );

    let listener = AdminListener::bind(
        config.admin.listen,
        Duration::from_secs(config.bans.default_duration_secs),
    )
    .await?;
    info!(
        addr = %config.admin.listen,
        default_ban_secs = config.bans.default_duration_secs,
        "admin interface ready"
    );

    listener.run(cache).await?;

    Ok(())
}
