//! Durable pagination-cursor storage.
//!
//! Maps (feed_spec, owner, post_id, repost_id) to cursor values and keeps
//! a per-feed last-cached-at watermark. The contract requires `clear_feed`
//! to be atomic with respect to concurrent reads of the same feed: no
//! observer may see a partially cleared state.

use crate::error::SyncResult;
use async_trait::async_trait;
use feedsync_types::RemoteKey;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Durable mapping from feed items to pagination cursors.
#[async_trait]
pub trait RemoteKeyStore: Send + Sync {
    /// Point lookup turning a boundary item into a cursor record.
    async fn find(
        &self,
        spec: &str,
        owner: &str,
        post_id: &str,
        repost_id: Option<&str>,
    ) -> SyncResult<Option<RemoteKey>>;

    /// Epoch seconds of the last successful sync for this feed, `None`
    /// when no sync has ever completed.
    async fn last_cached_at(&self, spec: &str, owner: &str) -> SyncResult<Option<i64>>;

    /// Creates or overwrites a cursor record and advances the feed's
    /// last-cached-at watermark.
    async fn upsert(&self, key: RemoteKey) -> SyncResult<()>;

    /// Removes every cursor record and the watermark for this feed.
    async fn clear_feed(&self, spec: &str, owner: &str) -> SyncResult<()>;
}

#[derive(Default)]
struct FeedKeys {
    keys: HashMap<(String, Option<String>), RemoteKey>,
    last_cached_at: Option<i64>,
}

/// An in-memory remote-key store.
///
/// One entry per (spec, owner); `clear_feed` removes the whole entry under
/// the write lock, so concurrent `find`/`last_cached_at` calls observe
/// either the full feed or nothing.
pub struct MemoryRemoteKeyStore {
    feeds: RwLock<HashMap<(String, String), FeedKeys>>,
}

impl MemoryRemoteKeyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            feeds: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryRemoteKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

fn feed_key(spec: &str, owner: &str) -> (String, String) {
    (spec.to_owned(), owner.to_owned())
}

#[async_trait]
impl RemoteKeyStore for MemoryRemoteKeyStore {
    async fn find(
        &self,
        spec: &str,
        owner: &str,
        post_id: &str,
        repost_id: Option<&str>,
    ) -> SyncResult<Option<RemoteKey>> {
        let feeds = self.feeds.read();
        let found = feeds.get(&feed_key(spec, owner)).and_then(|feed| {
            feed.keys
                .get(&(post_id.to_owned(), repost_id.map(str::to_owned)))
        });
        Ok(found.cloned())
    }

    async fn last_cached_at(&self, spec: &str, owner: &str) -> SyncResult<Option<i64>> {
        let feeds = self.feeds.read();
        Ok(feeds
            .get(&feed_key(spec, owner))
            .and_then(|feed| feed.last_cached_at))
    }

    async fn upsert(&self, key: RemoteKey) -> SyncResult<()> {
        let mut feeds = self.feeds.write();
        let feed = feeds
            .entry(feed_key(&key.feed_spec, &key.owner))
            .or_default();
        feed.last_cached_at = Some(match feed.last_cached_at {
            Some(at) => at.max(key.cached_at),
            None => key.cached_at,
        });
        feed.keys
            .insert((key.post_id.clone(), key.repost_id.clone()), key);
        Ok(())
    }

    async fn clear_feed(&self, spec: &str, owner: &str) -> SyncResult<()> {
        self.feeds.write().remove(&feed_key(spec, owner));
        Ok(())
    }
}
