//! Boundary queries over the persisted store.
//!
//! A boundary item is the oldest or newest locally cached item for a feed,
//! used to derive the next pagination cursor. The query form depends on the
//! feed's classification: in repost-capable feeds a repost and its original
//! occupy one list position, so the boundary is computed over the flattened
//! list; elsewhere only original posts are considered.

use feedsync_types::FeedScope;

/// Which end of the cached feed to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryEdge {
    /// The item with the smallest `feed_created_at`.
    Oldest,
    /// The item with the largest `feed_created_at`.
    Newest,
}

/// How repost entries participate in the boundary computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepostHandling {
    /// Reposts count as list positions, ordered by the repost timestamp.
    Flattened,
    /// Repost entries are ignored; only original posts are considered.
    OriginalsOnly,
}

/// A read-only query for one boundary item of a feed.
///
/// Built from a [`FeedScope`] and executed by the persisted-store
/// contract; never mutates the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryQuery {
    /// The feed-spec string.
    pub spec: String,
    /// The owning account.
    pub owner: String,
    /// Which end of the feed to select.
    pub edge: BoundaryEdge,
    /// Repost participation, selected from the feed classification.
    pub reposts: RepostHandling,
}

impl BoundaryQuery {
    /// Query for the oldest cached item of the scoped feed.
    pub fn oldest(scope: &FeedScope) -> Self {
        Self::at_edge(scope, BoundaryEdge::Oldest)
    }

    /// Query for the newest cached item of the scoped feed.
    pub fn newest(scope: &FeedScope) -> Self {
        Self::at_edge(scope, BoundaryEdge::Newest)
    }

    fn at_edge(scope: &FeedScope, edge: BoundaryEdge) -> Self {
        let reposts = if scope.kind.supports_reposts() {
            RepostHandling::Flattened
        } else {
            RepostHandling::OriginalsOnly
        };
        Self {
            spec: scope.spec.clone(),
            owner: scope.owner.clone(),
            edge,
            reposts,
        }
    }
}
