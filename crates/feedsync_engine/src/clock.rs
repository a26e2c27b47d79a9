//! Time source abstraction.
//!
//! Staleness and dedup windows are measured in epoch seconds. The engine
//! reads time through [`Clock`] so tests can pin or advance it.

use std::sync::atomic::{AtomicI64, Ordering};

/// A source of the current time in epoch seconds.
pub trait Clock: Send + Sync {
    /// Returns the current time as seconds since the Unix epoch.
    fn epoch_seconds(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_seconds(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

/// A settable clock for tests.
#[derive(Debug)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    /// Creates a clock pinned at the given epoch seconds.
    pub fn new(epoch_seconds: i64) -> Self {
        Self {
            now: AtomicI64::new(epoch_seconds),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Pins the clock at a new instant.
    pub fn set(&self, epoch_seconds: i64) {
        self.now.store(epoch_seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn epoch_seconds(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
