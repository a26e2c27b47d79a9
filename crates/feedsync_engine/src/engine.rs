//! Sync engine state machine.
//!
//! One engine is created per feed instance (spec + owner) and driven by an
//! external paged-list controller: `initialize` once, then `load` per
//! scroll direction. States are not persisted; each call is a one-shot
//! transition whose outcome is a tagged variant, never a thrown error.

use crate::boundary::BoundaryQuery;
use crate::clock::{Clock, SystemClock};
use crate::config::SyncConfig;
use crate::dedupe::RequestDeduper;
use crate::error::{ErrorKind, SyncError, SyncResult};
use crate::processor::FeedProcessor;
use crate::remote_keys::RemoteKeyStore;
use crate::store::FeedStore;
use crate::transport::{fetch_page, FeedApi};
use feedsync_types::{FeedItem, FeedPage, FeedRequest, FeedScope, LoadDirection};
use parking_lot::RwLock;
use std::sync::Arc;

/// Outcome of `initialize`: whether the controller should launch an
/// initial refresh before serving cached content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializeOutcome {
    /// The cache was discarded; load the feed head before serving.
    LaunchInitialRefresh,
    /// The cache is fresh enough to serve as-is.
    SkipInitialRefresh,
}

/// Outcome of one `load` call, consumed by the paged-list controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was persisted and more pages are likely available.
    Continue,
    /// The list cannot grow further in this direction right now. Not an
    /// error: also returned when there is nothing to paginate from or a
    /// repeated identical request was suppressed.
    EndOfPagination,
    /// The load failed in a way the controller may retry on user action.
    RetryableError(ErrorKind),
}

/// The per-feed-instance synchronization engine.
///
/// Collaborators are shared trait objects so one store can back several
/// feed instances; all durable state is keyed by (spec, owner), so
/// unrelated engines never contend.
pub struct SyncEngine {
    scope: FeedScope,
    config: SyncConfig,
    api: Arc<dyn FeedApi>,
    store: Arc<dyn FeedStore>,
    remote_keys: Arc<dyn RemoteKeyStore>,
    processor: Arc<dyn FeedProcessor>,
    deduper: RequestDeduper,
    /// Oldest item of the most recently processed page; preferred over a
    /// store query when resolving the append boundary.
    last_page_tail: RwLock<Option<FeedItem>>,
    clock: Arc<dyn Clock>,
}

impl SyncEngine {
    /// Creates an engine using the system wall clock.
    pub fn new(
        scope: FeedScope,
        config: SyncConfig,
        api: Arc<dyn FeedApi>,
        store: Arc<dyn FeedStore>,
        remote_keys: Arc<dyn RemoteKeyStore>,
        processor: Arc<dyn FeedProcessor>,
    ) -> Self {
        Self::with_clock(
            scope,
            config,
            api,
            store,
            remote_keys,
            processor,
            Arc::new(SystemClock),
        )
    }

    /// Creates an engine with an explicit time source.
    #[allow(clippy::too_many_arguments)]
    pub fn with_clock(
        scope: FeedScope,
        config: SyncConfig,
        api: Arc<dyn FeedApi>,
        store: Arc<dyn FeedStore>,
        remote_keys: Arc<dyn RemoteKeyStore>,
        processor: Arc<dyn FeedProcessor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            scope,
            config,
            api,
            store,
            remote_keys,
            processor,
            deduper: RequestDeduper::new(),
            last_page_tail: RwLock::new(None),
            clock,
        }
    }

    /// The feed instance this engine serves.
    pub fn scope(&self) -> &FeedScope {
        &self.scope
    }

    /// Decides whether to discard the local cache before the first load.
    ///
    /// Bookmark and profile-authored feeds always reset. Feeds with upward
    /// pagination reset when the newest cached item is older than the
    /// upward staleness window (or the cache is empty). Everything else
    /// resets when the last successful sync is absent or older than the
    /// plain staleness window.
    pub async fn initialize(&self) -> SyncResult<InitializeOutcome> {
        if self.should_reset().await? {
            tracing::debug!(
                spec = %self.scope.spec,
                owner = %self.scope.owner,
                "discarding stale feed cache"
            );
            self.reset_cache().await?;
            Ok(InitializeOutcome::LaunchInitialRefresh)
        } else {
            tracing::debug!(spec = %self.scope.spec, "feed cache fresh, keeping");
            Ok(InitializeOutcome::SkipInitialRefresh)
        }
    }

    async fn should_reset(&self) -> SyncResult<bool> {
        let kind = self.scope.kind;

        if kind.is_bookmark_feed()
            || kind.is_profile_authored_feed()
            || kind.is_profile_authored_replies_feed()
        {
            return Ok(true);
        }

        let now = self.clock.epoch_seconds();

        if kind.supports_upward_pagination() {
            let newest = self
                .store
                .boundary_item(&BoundaryQuery::newest(&self.scope))
                .await?;
            return Ok(match newest {
                Some(item) => {
                    now - item.feed_created_at > self.config.upward_cache_ttl.as_secs() as i64
                }
                None => true,
            });
        }

        let cached_at = self
            .remote_keys
            .last_cached_at(&self.scope.spec, &self.scope.owner)
            .await?;
        Ok(match cached_at {
            Some(at) => now - at > self.config.cache_ttl.as_secs() as i64,
            None => true,
        })
    }

    async fn reset_cache(&self) -> SyncResult<()> {
        self.remote_keys
            .clear_feed(&self.scope.spec, &self.scope.owner)
            .await?;
        self.store
            .delete_feed_items(&self.scope.spec, &self.scope.owner)
            .await?;
        *self.last_page_tail.write() = None;
        Ok(())
    }

    /// Loads one page in the given direction.
    ///
    /// Never returns a raw error: failures map onto
    /// [`LoadOutcome::RetryableError`]. Dropping the returned future
    /// cancels the in-flight network call without surfacing any outcome.
    pub async fn load(&self, direction: LoadDirection, page_size: u32) -> LoadOutcome {
        match self.load_inner(direction, page_size).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    spec = %self.scope.spec,
                    ?direction,
                    error = %err,
                    "load failed"
                );
                LoadOutcome::RetryableError(err.kind())
            }
        }
    }

    async fn load_inner(
        &self,
        direction: LoadDirection,
        page_size: u32,
    ) -> SyncResult<LoadOutcome> {
        match direction {
            // Upward sync is disabled in this version regardless of the
            // feed's classification; see the known-constraint test.
            LoadDirection::Prepend => Ok(LoadOutcome::EndOfPagination),
            LoadDirection::Refresh => self.refresh(page_size).await,
            LoadDirection::Append => self.append(page_size).await,
        }
    }

    async fn refresh(&self, page_size: u32) -> SyncResult<LoadOutcome> {
        let request = FeedRequest::refresh(&self.scope, page_size);

        // A refresh is always allowed; the deduper is not consulted.
        let page = fetch_page(self.api.as_ref(), &request, self.config.retry_delay).await?;
        self.deduper
            .record(LoadDirection::Refresh, request, self.clock.epoch_seconds());

        self.processor
            .process_and_persist(&self.scope, &page, true)
            .await?;
        self.note_page_tail(&page);

        Ok(outcome_for(&page))
    }

    async fn append(&self, page_size: u32) -> SyncResult<LoadOutcome> {
        let Some(boundary) = self.append_boundary().await? else {
            // Nothing to append from; a legitimate terminal state.
            return Ok(LoadOutcome::EndOfPagination);
        };

        let key = self
            .remote_keys
            .find(
                &self.scope.spec,
                &self.scope.owner,
                &boundary.post_id,
                boundary.repost_id.as_deref(),
            )
            .await?
            .ok_or(SyncError::MissingRemoteKey {
                post_id: boundary.post_id.clone(),
            })?;

        let request = FeedRequest::append(&self.scope, page_size, key.since_id.clone());

        let now = self.clock.epoch_seconds();
        if self
            .deduper
            .is_repeat(LoadDirection::Append, &request, now, self.config.dedup_window)
        {
            tracing::debug!(spec = %self.scope.spec, "suppressing repeated append request");
            return Ok(LoadOutcome::EndOfPagination);
        }

        let page = fetch_page(self.api.as_ref(), &request, self.config.retry_delay).await?;
        self.deduper
            .record(LoadDirection::Append, request, self.clock.epoch_seconds());

        self.processor
            .process_and_persist(&self.scope, &page, false)
            .await?;
        self.note_page_tail(&page);

        Ok(outcome_for(&page))
    }

    /// The item appends paginate from: the in-memory tail of the last
    /// processed page, falling back to the oldest cached item.
    async fn append_boundary(&self) -> SyncResult<Option<FeedItem>> {
        if let Some(item) = self.last_page_tail.read().clone() {
            return Ok(Some(item));
        }
        self.store
            .boundary_item(&BoundaryQuery::oldest(&self.scope))
            .await
    }

    fn note_page_tail(&self, page: &FeedPage) {
        if let Some(oldest) = page.oldest_item() {
            *self.last_page_tail.write() = Some(oldest.clone());
        }
    }
}

fn outcome_for(page: &FeedPage) -> LoadOutcome {
    if page.items.is_empty() {
        LoadOutcome::EndOfPagination
    } else {
        LoadOutcome::Continue
    }
}
