//! Ban cache core: expiring entry store, validated service, expiry sweep.

mod service;
mod store;
mod sweeper;

pub use service::{BanCache, BanListing, DEFAULT_BAN_SECS};
pub use store::{BanEntry, BanStore};
pub use sweeper::spawn_sweep_task;
