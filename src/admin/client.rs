//! CLI-side admin client.
//!
//! One connection per command, every network step bounded by the configured
//! timeout. Infrastructure failures surface as [`AdminError`]; command
//! rejections arrive as part of the [`CommandOutcome`] pair, since the CLI's
//! only job is to map that pair to an exit code and a printed message.

use futures_util::{SinkExt, StreamExt};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::{Framed, LinesCodec};

use crate::cache::BanListing;
use crate::error::AdminError;

use super::proto::{Request, Response};

/// Responses larger than this indicate a broken peer.
const MAX_RESPONSE_LENGTH: usize = 1 << 20;

/// Success flag plus human-readable message, as consumed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub ok: bool,
    pub message: String,
}

impl CommandOutcome {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Client for the daemon's admin wire protocol.
pub struct AdminClient {
    addr: SocketAddr,
    timeout: Duration,
}

impl AdminClient {
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self { addr, timeout }
    }

    /// One-shot request/response exchange with the daemon.
    async fn call(&self, request: Request) -> Result<Response, AdminError> {
        let stream = timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| AdminError::Timeout(self.timeout))?
            .map_err(|source| AdminError::Unreachable {
                addr: self.addr,
                source,
            })?;
        let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_RESPONSE_LENGTH));

        let json =
            serde_json::to_string(&request).map_err(|e| AdminError::Protocol(e.to_string()))?;
        timeout(self.timeout, framed.send(json))
            .await
            .map_err(|_| AdminError::Timeout(self.timeout))?
            .map_err(|e| AdminError::Protocol(e.to_string()))?;

        let line = timeout(self.timeout, framed.next())
            .await
            .map_err(|_| AdminError::Timeout(self.timeout))?
            .ok_or_else(|| AdminError::Protocol("connection closed before response".into()))?
            .map_err(|e| AdminError::Protocol(e.to_string()))?;

        serde_json::from_str(&line).map_err(|e| AdminError::Protocol(e.to_string()))
    }

    /// Ban an address. `duration_secs = None` applies the daemon's default.
    pub async fn ban(
        &self,
        address: &str,
        duration_secs: Option<i64>,
        reason: Option<String>,
    ) -> Result<CommandOutcome, AdminError> {
        let request = Request::Ban {
            address: address.to_string(),
            duration_secs,
            reason,
        };
        match self.call(request).await? {
            Response::Ok { message } => Ok(CommandOutcome::success(message)),
            Response::Error { message, .. } => Ok(CommandOutcome::failure(message)),
            other => Err(unexpected(other)),
        }
    }

    /// Lift a ban. The outcome flag mirrors whether an active ban was lifted.
    pub async fn unban(&self, address: &str) -> Result<CommandOutcome, AdminError> {
        let request = Request::Unban {
            address: address.to_string(),
        };
        match self.call(request).await? {
            Response::Removed { removed, message } => Ok(CommandOutcome {
                ok: removed,
                message,
            }),
            Response::Error { message, .. } => Ok(CommandOutcome::failure(message)),
            other => Err(unexpected(other)),
        }
    }

    /// Enumerate active bans.
    pub async fn bans(&self) -> Result<Vec<BanListing>, AdminError> {
        match self.call(Request::Bans).await? {
            Response::Bans { entries } => Ok(entries),
            other => Err(unexpected(other)),
        }
    }

    /// Request-path predicate over the wire.
    ///
    /// Takes a parsed address, so a rejection can only mean a broken peer.
    pub async fn is_banned(&self, addr: &IpAddr) -> Result<bool, AdminError> {
        let request = Request::Check {
            address: addr.to_string(),
        };
        match self.call(request).await? {
            Response::Banned { banned } => Ok(banned),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(response: Response) -> AdminError {
    AdminError::Protocol(format!("unexpected response: {response:?}"))
}
