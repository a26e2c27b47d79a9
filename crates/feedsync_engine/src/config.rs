//! Configuration for the sync engine.

use std::time::Duration;

/// Configuration for one sync engine instance.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Staleness window for feeds without upward pagination: the cache is
    /// discarded on initialize when the last successful sync is older.
    pub cache_ttl: Duration,
    /// Staleness window for feeds with upward pagination, measured against
    /// the newest cached item's timestamp.
    pub upward_cache_ttl: Duration,
    /// Window during which an identical repeated append request is
    /// suppressed rather than re-sent.
    pub dedup_window: Duration,
    /// Fixed delay before the single transparent retry of a transient
    /// transport failure.
    pub retry_delay: Duration,
}

impl SyncConfig {
    /// Creates a configuration with the default windows.
    pub fn new() -> Self {
        Self {
            cache_ttl: Duration::from_secs(180),
            upward_cache_ttl: Duration::from_secs(24 * 60 * 60),
            dedup_window: Duration::from_secs(10),
            retry_delay: Duration::from_millis(500),
        }
    }

    /// Sets the staleness window for plain feeds.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets the staleness window for upward-paginating feeds.
    pub fn with_upward_cache_ttl(mut self, ttl: Duration) -> Self {
        self.upward_cache_ttl = ttl;
        self
    }

    /// Sets the duplicate-request suppression window.
    pub fn with_dedup_window(mut self, window: Duration) -> Self {
        self.dedup_window = window;
        self
    }

    /// Sets the transparent-retry delay.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}
