//! Duplicate-request suppression.
//!
//! Guards against a degenerate loop where the controller keeps asking for
//! the next page but the boundary cursor never advances (the remote has
//! genuinely returned the full tail), which would otherwise cause rapid
//! repeated identical network calls.

use feedsync_types::{FeedRequest, LoadDirection};
use parking_lot::RwLock;
use std::time::Duration;

#[derive(Debug, Clone)]
struct LastRequest {
    request: FeedRequest,
    recorded_at: i64,
}

/// Per-engine record of the last request issued in each direction.
///
/// A fixed arena of one slot per direction; slots lock independently so
/// concurrent calls from different directions never contend. In-memory
/// only, reset by process restart.
#[derive(Debug, Default)]
pub struct RequestDeduper {
    refresh: RwLock<Option<LastRequest>>,
    prepend: RwLock<Option<LastRequest>>,
    append: RwLock<Option<LastRequest>>,
}

impl RequestDeduper {
    /// Creates a deduper with empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, direction: LoadDirection) -> &RwLock<Option<LastRequest>> {
        match direction {
            LoadDirection::Refresh => &self.refresh,
            LoadDirection::Prepend => &self.prepend,
            LoadDirection::Append => &self.append,
        }
    }

    /// Returns true iff the previous request recorded for `direction` is
    /// structurally equal to `request` and was recorded within `window`
    /// of `now`.
    pub fn is_repeat(
        &self,
        direction: LoadDirection,
        request: &FeedRequest,
        now_epoch_seconds: i64,
        window: Duration,
    ) -> bool {
        let slot = self.slot(direction).read();
        match slot.as_ref() {
            Some(last) => {
                let age = now_epoch_seconds - last.recorded_at;
                last.request == *request && (0..=window.as_secs() as i64).contains(&age)
            }
            None => false,
        }
    }

    /// Records the request just sent in `direction`.
    pub fn record(&self, direction: LoadDirection, request: FeedRequest, now_epoch_seconds: i64) {
        *self.slot(direction).write() = Some(LastRequest {
            request,
            recorded_at: now_epoch_seconds,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedsync_types::FeedScope;

    const WINDOW: Duration = Duration::from_secs(10);

    fn request(until: &str) -> FeedRequest {
        FeedRequest::append(&FeedScope::new("home", "owner-1"), 25, Some(until.into()))
    }

    #[test]
    fn identical_request_within_window_is_repeat() {
        let deduper = RequestDeduper::new();
        deduper.record(LoadDirection::Append, request("c1"), 1000);

        assert!(deduper.is_repeat(LoadDirection::Append, &request("c1"), 1005, WINDOW));
        assert!(deduper.is_repeat(LoadDirection::Append, &request("c1"), 1010, WINDOW));
    }

    #[test]
    fn expired_window_is_not_repeat() {
        let deduper = RequestDeduper::new();
        deduper.record(LoadDirection::Append, request("c1"), 1000);

        assert!(!deduper.is_repeat(LoadDirection::Append, &request("c1"), 1011, WINDOW));
    }

    #[test]
    fn different_body_is_not_repeat() {
        let deduper = RequestDeduper::new();
        deduper.record(LoadDirection::Append, request("c1"), 1000);

        assert!(!deduper.is_repeat(LoadDirection::Append, &request("c2"), 1001, WINDOW));
    }

    #[test]
    fn empty_slot_is_not_repeat() {
        let deduper = RequestDeduper::new();
        assert!(!deduper.is_repeat(LoadDirection::Append, &request("c1"), 1000, WINDOW));
    }

    #[test]
    fn slots_are_independent_per_direction() {
        let deduper = RequestDeduper::new();
        deduper.record(LoadDirection::Append, request("c1"), 1000);

        assert!(!deduper.is_repeat(LoadDirection::Prepend, &request("c1"), 1001, WINDOW));
        assert!(!deduper.is_repeat(LoadDirection::Refresh, &request("c1"), 1001, WINDOW));
    }

    #[test]
    fn record_overwrites_previous_slot() {
        let deduper = RequestDeduper::new();
        deduper.record(LoadDirection::Append, request("c1"), 1000);
        deduper.record(LoadDirection::Append, request("c2"), 1002);

        assert!(!deduper.is_repeat(LoadDirection::Append, &request("c1"), 1003, WINDOW));
        assert!(deduper.is_repeat(LoadDirection::Append, &request("c2"), 1003, WINDOW));
    }
}
