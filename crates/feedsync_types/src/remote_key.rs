//! Pagination cursor records.

use serde::{Deserialize, Serialize};

/// A persisted pagination cursor record.
///
/// Keyed by (feed_spec, owner, post_id, repost_id). `since_id` is the
/// cursor for moving toward newer items, `until_id` for moving toward
/// older items. `cached_at` records the last successful sync that touched
/// this feed; the per-feed maximum is the staleness watermark consulted on
/// initialize.
///
/// Rows are created or overwritten whenever the feed processor persists a
/// page, never mutated outside a sync cycle, and deleted wholesale when
/// the feed's cache is reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteKey {
    /// The feed-spec string this cursor belongs to.
    pub feed_spec: String,
    /// The owning account.
    pub owner: String,
    /// Post identifier of the item this cursor was derived from.
    pub post_id: String,
    /// Repost identifier, when the item is a repost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repost_id: Option<String>,
    /// Cursor toward newer items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since_id: Option<String>,
    /// Cursor toward older items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_id: Option<String>,
    /// Epoch seconds of the last successful sync for this feed.
    pub cached_at: i64,
}

impl RemoteKey {
    /// Creates a key with no cursors.
    pub fn new(
        feed_spec: impl Into<String>,
        owner: impl Into<String>,
        post_id: impl Into<String>,
        repost_id: Option<String>,
        cached_at: i64,
    ) -> Self {
        Self {
            feed_spec: feed_spec.into(),
            owner: owner.into(),
            post_id: post_id.into(),
            repost_id,
            since_id: None,
            until_id: None,
            cached_at,
        }
    }

    /// Sets the newer-items cursor.
    pub fn with_since_id(mut self, since_id: impl Into<String>) -> Self {
        self.since_id = Some(since_id.into());
        self
    }

    /// Sets the older-items cursor.
    pub fn with_until_id(mut self, until_id: impl Into<String>) -> Self {
        self.until_id = Some(until_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_cursors() {
        let key = RemoteKey::new("home", "owner-1", "p1", None, 1000)
            .with_since_id("s1")
            .with_until_id("u1");

        assert_eq!(key.since_id.as_deref(), Some("s1"));
        assert_eq!(key.until_id.as_deref(), Some("u1"));
        assert_eq!(key.cached_at, 1000);
    }
}
