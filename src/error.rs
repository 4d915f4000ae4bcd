//! Unified error handling for bancached.
//!
//! Two distinct categories cross the admin boundary:
//!
//! - [`BanError`]: a command was understood and rejected (validation)
//! - [`AdminError`]: the daemon could not be consulted at all (infrastructure)
//!
//! Absence is never an error anywhere in the crate: unbanning an address that
//! was not banned yields `Ok(false)`, looking up an absent address yields
//! `None`/`false`.

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Validation errors for ban cache operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BanError {
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("ban duration must be a positive number of seconds")]
    InvalidDuration,
}

impl BanError {
    /// Get a static error code string for wire and log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAddress(_) => "invalid_address",
            Self::InvalidDuration => "invalid_duration",
        }
    }
}

/// Infrastructure errors raised by the CLI-side admin client.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("cannot reach ban cache daemon at {addr}: {source}")]
    Unreachable {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("request to ban cache daemon timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response from daemon: {0}")]
    Protocol(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ban_error_codes() {
        assert_eq!(
            BanError::InvalidAddress("nope".into()).error_code(),
            "invalid_address"
        );
        assert_eq!(BanError::InvalidDuration.error_code(), "invalid_duration");
    }

    #[test]
    fn test_ban_error_messages_name_the_input() {
        let err = BanError::InvalidAddress("not-an-ip".into());
        assert!(err.to_string().contains("not-an-ip"));
    }

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::Timeout(Duration::from_secs(5));
        assert!(err.to_string().contains("timed out"));

        let err = AdminError::Unreachable {
            addr: "127.0.0.1:4680".parse().unwrap(),
            source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
        };
        assert!(err.to_string().contains("127.0.0.1:4680"));
    }
}
