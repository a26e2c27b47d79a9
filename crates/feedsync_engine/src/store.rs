//! Persisted-store contract.
//!
//! The durable storage engine is an external collaborator; the sync engine
//! touches it only through this narrow read/delete contract. An in-memory
//! implementation is provided for tests and as a reference for durable
//! backends.

use crate::boundary::{BoundaryEdge, BoundaryQuery, RepostHandling};
use crate::error::SyncResult;
use async_trait::async_trait;
use feedsync_types::FeedItem;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Read and delete access to the locally persisted feed items.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Executes a boundary query, returning the matching item if the
    /// cached set is non-empty.
    async fn boundary_item(&self, query: &BoundaryQuery) -> SyncResult<Option<FeedItem>>;

    /// Drops all items cached for the given feed, called on cache reset so
    /// no orphaned rows outlive their cursor records.
    async fn delete_feed_items(&self, spec: &str, owner: &str) -> SyncResult<()>;
}

/// An in-memory feed store.
pub struct MemoryFeedStore {
    feeds: RwLock<HashMap<(String, String), Vec<FeedItem>>>,
}

impl MemoryFeedStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            feeds: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a single item into a feed.
    pub fn insert(&self, spec: &str, owner: &str, item: FeedItem) {
        self.feeds
            .write()
            .entry(key(spec, owner))
            .or_default()
            .push(item);
    }

    /// Replaces the feed's membership with the given items.
    pub fn replace(&self, spec: &str, owner: &str, items: Vec<FeedItem>) {
        self.feeds.write().insert(key(spec, owner), items);
    }

    /// Merges items into the feed, overwriting entries with the same
    /// (post_id, repost_id) position.
    pub fn merge(&self, spec: &str, owner: &str, items: Vec<FeedItem>) {
        let mut feeds = self.feeds.write();
        let entries = feeds.entry(key(spec, owner)).or_default();
        for item in items {
            match entries
                .iter()
                .position(|e| e.post_id == item.post_id && e.repost_id == item.repost_id)
            {
                Some(pos) => entries[pos] = item,
                None => entries.push(item),
            }
        }
    }

    /// Returns a snapshot of the feed's items.
    pub fn items(&self, spec: &str, owner: &str) -> Vec<FeedItem> {
        self.feeds
            .read()
            .get(&key(spec, owner))
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for MemoryFeedStore {
    fn default() -> Self {
        Self::new()
    }
}

fn key(spec: &str, owner: &str) -> (String, String) {
    (spec.to_owned(), owner.to_owned())
}

#[async_trait]
impl FeedStore for MemoryFeedStore {
    async fn boundary_item(&self, query: &BoundaryQuery) -> SyncResult<Option<FeedItem>> {
        let feeds = self.feeds.read();
        let Some(items) = feeds.get(&key(&query.spec, &query.owner)) else {
            return Ok(None);
        };

        let candidates = items.iter().filter(|item| match query.reposts {
            RepostHandling::Flattened => true,
            RepostHandling::OriginalsOnly => !item.is_repost(),
        });

        let found = match query.edge {
            BoundaryEdge::Oldest => candidates.min_by(|a, b| order(a).cmp(&order(b))),
            BoundaryEdge::Newest => candidates.max_by(|a, b| order(a).cmp(&order(b))),
        };

        Ok(found.cloned())
    }

    async fn delete_feed_items(&self, spec: &str, owner: &str) -> SyncResult<()> {
        self.feeds.write().remove(&key(spec, owner));
        Ok(())
    }
}

fn order(item: &FeedItem) -> (i64, &str) {
    (item.feed_created_at, item.post_id.as_str())
}
