//! Validated, concurrency-safe ban cache surface.
//!
//! Wraps the [`BanStore`] with input validation and lazy-expiry semantics.
//! The store is owned exclusively by this service; no other component mutates
//! it, so the lazy read path and the eager sweep path can never disagree.

use crate::error::BanError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

use super::store::{BanEntry, BanStore};

/// Ban duration applied when the caller supplies none (24 hours).
pub const DEFAULT_BAN_SECS: u64 = 86_400;

/// One active ban as reported by [`BanCache::list_bans`].
///
/// Carries remaining time-to-live rather than the absolute expiration, which
/// is an internal detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanListing {
    pub address: IpAddr,
    /// Remaining time-to-live in whole seconds, rounded up.
    pub remaining_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The ban cache service.
///
/// Cheap to share behind an `Arc`; all operations take `&self` and complete
/// in bounded time. `is_banned` is the hot path consulted once per inbound
/// request and never blocks other readers.
#[derive(Debug, Default)]
pub struct BanCache {
    store: BanStore,
}

impl BanCache {
    /// Create an empty ban cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_address(address: &str) -> Result<IpAddr, BanError> {
        address
            .trim()
            .parse()
            .map_err(|_| BanError::InvalidAddress(address.to_string()))
    }

    /// Ban `address` for `duration` from now.
    ///
    /// Idempotent: re-banning an already-banned address overwrites its
    /// expiration unconditionally, extending or shortening it. Validation
    /// failures leave the store untouched.
    pub fn ban(
        &self,
        address: &str,
        duration: Duration,
        reason: Option<String>,
    ) -> Result<(), BanError> {
        let addr = Self::parse_address(address)?;
        if duration.is_zero() {
            return Err(BanError::InvalidDuration);
        }

        let ttl_ms = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        let expires_at = Utc::now().timestamp_millis().saturating_add(ttl_ms);
        self.store.put(addr, BanEntry { expires_at, reason });

        debug!(%addr, duration_secs = duration.as_secs(), "ban recorded");
        Ok(())
    }

    /// Lift any active ban on `address`.
    ///
    /// Returns `Ok(true)` only when a non-expired ban was actually removed;
    /// an address that was never banned or whose ban already lapsed yields
    /// `Ok(false)`. Callers use the distinction for reporting ("ban removed"
    /// vs "no active ban").
    pub fn unban(&self, address: &str) -> Result<bool, BanError> {
        let addr = Self::parse_address(address)?;
        let now = Utc::now().timestamp_millis();

        match self.store.get(&addr) {
            None => Ok(false),
            Some(entry) => {
                let removed = self.store.remove(&addr);
                if removed && !entry.is_expired_at(now) {
                    debug!(%addr, "ban lifted");
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// **HOT PATH**: Check whether `addr` is currently banned.
    ///
    /// Lazy expiry: an entry whose expiration is at or before now reads as
    /// absent whether or not the sweeper has reclaimed it yet. Allocation-free
    /// and non-blocking under read concurrency.
    #[inline]
    pub fn is_banned(&self, addr: &IpAddr) -> bool {
        let now = Utc::now().timestamp_millis();
        self.store.expiry_of(addr).is_some_and(|expiry| expiry > now)
    }

    /// String-validating twin of [`is_banned`](Self::is_banned), backing the
    /// wire `check` operation.
    pub fn is_banned_str(&self, address: &str) -> Result<bool, BanError> {
        Ok(self.is_banned(&Self::parse_address(address)?))
    }

    /// Enumerate active bans with their remaining time-to-live.
    ///
    /// Takes a consistent snapshot, then filters logically expired entries.
    /// Output is sorted by address.
    pub fn list_bans(&self) -> Vec<BanListing> {
        let now = Utc::now().timestamp_millis();
        self.store
            .snapshot()
            .into_iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(address, entry)| BanListing {
                address,
                remaining_secs: ((entry.expires_at - now) as u64).div_ceil(1000),
                reason: entry.reason,
            })
            .collect()
    }

    /// Remove every entry that has expired by now; returns how many were
    /// reclaimed. Advisory: correctness never depends on it.
    pub fn sweep(&self) -> usize {
        self.store.retain_unexpired(Utc::now().timestamp_millis())
    }

    /// Physical number of resident entries, including logically expired ones.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no entries are physically resident.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
