//! bancached - shared, time-bounded IP ban cache.
//!
//! Sits in the request path of a web-facing security proxy: records that a
//! client IP is temporarily forbidden, answers "is this IP currently banned"
//! with low latency for every incoming request, and lets administrators or
//! automated detection logic add, remove, and enumerate bans.
//!
//! # Architecture
//!
//! - [`cache`]: the expiring entry store, the validated service surface, and
//!   the background expiry sweep task
//! - [`admin`]: the administrative boundary (line-JSON wire protocol, the
//!   daemon-side listener, and the CLI-side client)
//! - [`config`]: TOML configuration
//! - [`error`]: typed error hierarchy
//!
//! Expired entries are filtered lazily on every read path; the background
//! sweep only bounds memory and is never required for correctness.

pub mod admin;
pub mod cache;
pub mod config;
pub mod error;
