//! Background reclamation of expired ban entries.
//!
//! The sweep is advisory: every read path already filters expired entries
//! lazily, so a late or skipped sweep only delays memory reclamation and can
//! never cause a stale ban to be honored. Removal re-checks each entry's
//! expiration under the store's write lock, so a concurrent re-ban always
//! wins over a stale sweep decision.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use super::BanCache;

/// Spawn the periodic expiry sweep task.
///
/// Runs one sweep per `interval` tick until the returned handle is aborted or
/// the runtime shuts down.
pub fn spawn_sweep_task(cache: Arc<BanCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = cache.sweep();
            if removed > 0 {
                debug!(removed, "expired bans reclaimed");
            }
        }
    })
}
