//! Administrative boundary between the ban cache service and its callers.
//!
//! Three pieces: the line-JSON wire protocol ([`proto`]), the daemon-side
//! listener ([`server`]), and the CLI-side client ([`client`]). The request
//! filtering path of a co-resident proxy calls
//! [`BanCache::is_banned`](crate::cache::BanCache::is_banned) directly; an
//! externalized deployment uses the wire `check` operation instead.

mod client;
mod proto;
mod server;

pub use client::{AdminClient, CommandOutcome};
pub use proto::{ErrorKind, Request, Response};
pub use server::AdminListener;
