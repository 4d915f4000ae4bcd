//! Daemon-side admin listener.
//!
//! Accept loop in the gateway style: each connection gets its own task, with
//! requests framed by [`LinesCodec`] and dispatched synchronously against the
//! ban cache. All operations are in-memory and complete promptly, so no
//! per-request timeout is needed on this side; the client applies one.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

use crate::cache::BanCache;
use crate::error::BanError;

use super::proto::{ErrorKind, Request, Response};

/// Request lines longer than this are rejected by the codec.
const MAX_LINE_LENGTH: usize = 8192;

/// TCP listener serving the admin wire protocol.
pub struct AdminListener {
    listener: TcpListener,
    default_ban: Duration,
}

impl AdminListener {
    /// Bind the admin listener.
    ///
    /// `default_ban` is applied to `ban` requests that carry no duration.
    pub async fn bind(addr: SocketAddr, default_ban: Duration) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "admin listener bound");
        Ok(Self {
            listener,
            default_ban,
        })
    }

    /// Actual bound address (useful when binding port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop. Runs until the listener fails or the task is dropped.
    pub async fn run(self, cache: Arc<BanCache>) -> std::io::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    debug!(%peer, "admin connection accepted");
                    let cache = Arc::clone(&cache);
                    let default_ban = self.default_ban;
                    tokio::spawn(async move {
                        if let Err(e) = serve_connection(stream, cache, default_ban).await {
                            warn!(%peer, error = %e, "admin connection error");
                        }
                        debug!(%peer, "admin connection closed");
                    });
                }
                Err(e) => {
                    warn!(error = %e, "failed to accept admin connection");
                }
            }
        }
    }
}

/// Serve one admin connection: one JSON request per line, one JSON response
/// per line, until the peer disconnects.
async fn serve_connection(
    stream: TcpStream,
    cache: Arc<BanCache>,
    default_ban: Duration,
) -> Result<(), LinesCodecError> {
    let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

    while let Some(line) = framed.next().await {
        let line = line?;
        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => dispatch(&cache, default_ban, request),
            Err(e) => Response::Error {
                kind: ErrorKind::BadRequest,
                message: format!("malformed request: {e}"),
            },
        };

        match serde_json::to_string(&response) {
            Ok(json) => framed.send(json).await?,
            Err(e) => {
                // Response enums always serialize; log and drop if they ever don't.
                warn!(error = %e, "failed to encode admin response");
            }
        }
    }

    Ok(())
}

/// Map one request onto the ban cache service.
fn dispatch(cache: &BanCache, default_ban: Duration, request: Request) -> Response {
    match request {
        Request::Ban {
            address,
            duration_secs,
            reason,
        } => {
            let duration = match duration_secs {
                None => default_ban,
                Some(secs) if secs > 0 => Duration::from_secs(secs as u64),
                Some(_) => return Response::from_ban_error(&BanError::InvalidDuration),
            };
            match cache.ban(&address, duration, reason) {
                Ok(()) => Response::Ok {
                    message: format!("{address} banned for {}s", duration.as_secs()),
                },
                Err(e) => Response::from_ban_error(&e),
            }
        }
        Request::Unban { address } => match cache.unban(&address) {
            Ok(true) => Response::Removed {
                removed: true,
                message: format!("ban removed for {address}"),
            },
            Ok(false) => Response::Removed {
                removed: false,
                message: format!("no active ban for {address}"),
            },
            Err(e) => Response::from_ban_error(&e),
        },
        Request::Bans => Response::Bans {
            entries: cache.list_bans(),
        },
        Request::Check { address } => match cache.is_banned_str(&address) {
            Ok(banned) => Response::Banned { banned },
            Err(e) => Response::from_ban_error(&e),
        },
    }
}
