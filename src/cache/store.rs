//! Expiring entry store: address -> ban entry.
//!
//! A pure data structure. Expiry *filtering* is the caller's responsibility;
//! the store only offers atomic primitives over the map, so the lazy-expiry
//! read path and the eager sweep path cannot disagree about its contents.
//!
//! Reads take a shared lock and proceed fully in parallel. Writes take the
//! exclusive lock; bans are rare relative to lookups, so a single coarse lock
//! is sufficient. `snapshot` holds the read lock for the duration of the copy
//! only, never across I/O.

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::net::IpAddr;

/// A stored ban with expiration tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanEntry {
    /// Unix timestamp in milliseconds when the ban lapses.
    pub expires_at: i64,
    /// Free-form reason. Reporting only, never used for logic.
    pub reason: Option<String>,
}

impl BanEntry {
    /// Check whether this entry has lapsed at `now` (Unix milliseconds).
    ///
    /// An entry expiring exactly at `now` is already lapsed.
    #[inline]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    /// Check whether this entry has lapsed at the current wall clock.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }
}

/// In-memory map from IP address to ban entry.
///
/// At most one entry exists per address; `put` on an existing address
/// overwrites it.
#[derive(Debug, Default)]
pub struct BanStore {
    entries: RwLock<HashMap<IpAddr, BanEntry>>,
}

impl BanStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `addr`.
    ///
    /// Visible to all subsequent reads immediately.
    pub fn put(&self, addr: IpAddr, entry: BanEntry) {
        self.entries.write().insert(addr, entry);
    }

    /// Delete the entry for `addr` if present.
    ///
    /// Returns whether anything was removed; absence is a value, not an error.
    pub fn remove(&self, addr: &IpAddr) -> bool {
        self.entries.write().remove(addr).is_some()
    }

    /// Get the entry for `addr`, expired or not.
    pub fn get(&self, addr: &IpAddr) -> Option<BanEntry> {
        self.entries.read().get(addr).cloned()
    }

    /// Get just the expiration timestamp for `addr`, expired or not.
    ///
    /// Allocation-free variant of [`get`](Self::get) for the lookup hot path.
    #[inline]
    pub fn expiry_of(&self, addr: &IpAddr) -> Option<i64> {
        self.entries.read().get(addr).map(|entry| entry.expires_at)
    }

    /// Take a point-in-time copy of all entries, sorted by address.
    ///
    /// The read lock is held only while copying, so no reader ever observes a
    /// half-mutated enumeration.
    pub fn snapshot(&self) -> Vec<(IpAddr, BanEntry)> {
        let mut entries: Vec<(IpAddr, BanEntry)> = self
            .entries
            .read()
            .iter()
            .map(|(addr, entry)| (*addr, entry.clone()))
            .collect();
        entries.sort_unstable_by_key(|(addr, _)| *addr);
        entries
    }

    /// Remove every entry expired at `now`; returns how many were removed.
    ///
    /// Each candidate's expiration is re-evaluated under the write lock at the
    /// moment of removal, so an entry refreshed by a concurrent `put` survives
    /// a sweep that began before the refresh.
    pub fn retain_unexpired(&self, now: i64) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Physical number of resident entries, including logically expired ones.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
