//! Feed processor contract.
//!
//! The processor transforms a raw remote page into persisted entities and
//! cursor records. The production implementation lives with the app's
//! storage layer; [`MemoryFeedProcessor`] is the in-memory reference used
//! in tests.

use crate::clock::Clock;
use crate::error::SyncResult;
use crate::remote_keys::RemoteKeyStore;
use crate::store::MemoryFeedStore;
use async_trait::async_trait;
use feedsync_types::{FeedPage, FeedScope, RemoteKey};
use std::sync::Arc;

/// Persists a remote page into the local store.
#[async_trait]
pub trait FeedProcessor: Send + Sync {
    /// Writes the page's items and their cursor records. With
    /// `clear_feed` the feed's prior membership is replaced rather than
    /// merged.
    async fn process_and_persist(
        &self,
        scope: &FeedScope,
        page: &FeedPage,
        clear_feed: bool,
    ) -> SyncResult<()>;
}

/// An in-memory feed processor.
///
/// Upserts one cursor record per item, deriving both cursors from the
/// item's post id. A durable implementation would derive them from the
/// remote's paging metadata instead; what matters to the engine is that
/// every persisted boundary item can be turned back into a cursor.
pub struct MemoryFeedProcessor {
    store: Arc<MemoryFeedStore>,
    remote_keys: Arc<dyn RemoteKeyStore>,
    clock: Arc<dyn Clock>,
}

impl MemoryFeedProcessor {
    /// Creates a processor writing into the given store and key store.
    pub fn new(
        store: Arc<MemoryFeedStore>,
        remote_keys: Arc<dyn RemoteKeyStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            remote_keys,
            clock,
        }
    }
}

#[async_trait]
impl FeedProcessor for MemoryFeedProcessor {
    async fn process_and_persist(
        &self,
        scope: &FeedScope,
        page: &FeedPage,
        clear_feed: bool,
    ) -> SyncResult<()> {
        let now = self.clock.epoch_seconds();

        if clear_feed {
            self.remote_keys
                .clear_feed(&scope.spec, &scope.owner)
                .await?;
            self.store
                .replace(&scope.spec, &scope.owner, page.items.clone());
        } else {
            self.store
                .merge(&scope.spec, &scope.owner, page.items.clone());
        }

        for item in &page.items {
            let key = RemoteKey::new(
                scope.spec.clone(),
                scope.owner.clone(),
                item.post_id.clone(),
                item.repost_id.clone(),
                now,
            )
            .with_since_id(item.post_id.clone())
            .with_until_id(item.post_id.clone());
            self.remote_keys.upsert(key).await?;
        }

        Ok(())
    }
}
