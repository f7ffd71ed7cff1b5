//! In-memory team cache with TTL expiry.
//!
//! A single competition's teams are cached against a write timestamp. There
//! is no eviction policy and no size bound; the store holds at most one
//! entry. Stale data stays readable so the service can fall back to it when
//! a refresh fails.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::football::model::Team;

struct CacheEntry {
    teams: Vec<Team>,
    /// Unix timestamp of the write.
    fetched_at: u64,
}

/// TTL-gated store for the competition's teams.
pub struct TeamCache {
    entry: Option<CacheEntry>,
    ttl_secs: u64,
}

impl TeamCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entry: None,
            ttl_secs,
        }
    }

    /// The cached teams, only while younger than the TTL.
    pub fn fresh(&self) -> Option<&[Team]> {
        let entry = self.entry.as_ref()?;
        let age = Self::now_secs().saturating_sub(entry.fetched_at);
        (age < self.ttl_secs).then_some(entry.teams.as_slice())
    }

    /// The cached teams regardless of age. Used as the fallback when a
    /// refresh fails.
    pub fn stale(&self) -> Option<&[Team]> {
        self.entry.as_ref().map(|e| e.teams.as_slice())
    }

    /// Replace the cached teams and reset the write timestamp.
    pub fn put(&mut self, teams: Vec<Team>) {
        self.entry = Some(CacheEntry {
            teams,
            fetched_at: Self::now_secs(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Shift the write timestamp into the past to force expiry.
    #[cfg(test)]
    pub(crate) fn backdate(&mut self, secs: u64) {
        if let Some(entry) = &mut self.entry {
            entry.fetched_at = entry.fetched_at.saturating_sub(secs);
        }
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
