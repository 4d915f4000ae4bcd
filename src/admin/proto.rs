//! Line-oriented JSON protocol for the admin boundary.
//!
//! One JSON document per line in each direction. Requests are tagged by
//! `"op"`, responses by `"status"`. Failure responses carry a typed `kind` so
//! callers branch on it instead of parsing message strings.

use serde::{Deserialize, Serialize};

use crate::cache::BanListing;
use crate::error::BanError;

/// Administrative request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Ban an address. Without `duration_secs` the daemon applies its
    /// configured default (86400 s unless overridden).
    Ban {
        address: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_secs: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// Lift an active ban.
    Unban { address: String },
    /// Enumerate active bans.
    Bans,
    /// Request-path predicate: is this address currently banned?
    Check { address: String },
}

/// Daemon reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    /// Command succeeded with no payload beyond a message.
    Ok { message: String },
    /// Unban result: `removed` distinguishes "ban removed" from
    /// "no active ban".
    Removed { removed: bool, message: String },
    /// Active ban listing.
    Bans { entries: Vec<BanListing> },
    /// Check result.
    Banned { banned: bool },
    /// Command rejected.
    Error { kind: ErrorKind, message: String },
}

impl Response {
    /// Build an error response from a validation failure.
    pub fn from_ban_error(err: &BanError) -> Self {
        Response::Error {
            kind: err.into(),
            message: err.to_string(),
        }
    }
}

/// Machine-branchable failure kinds carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidAddress,
    InvalidDuration,
    /// The request line was not a well-formed request document.
    BadRequest,
}

impl From<&BanError> for ErrorKind {
    fn from(err: &BanError) -> Self {
        match err {
            BanError::InvalidAddress(_) => ErrorKind::InvalidAddress,
            BanError::InvalidDuration => ErrorKind::InvalidDuration,
        }
    }
}
