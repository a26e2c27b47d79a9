//! Wire types for the remote feed API.

use crate::item::FeedItem;
use crate::spec::FeedScope;
use serde::{Deserialize, Serialize};

/// The direction of a load issued by the paged-list controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadDirection {
    /// Replace the feed with its current head.
    Refresh,
    /// Extend the feed toward newer items.
    Prepend,
    /// Extend the feed toward older items.
    Append,
}

/// Requested ordering of returned items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Oldest first.
    #[serde(rename = "asc")]
    Ascending,
    /// Newest first.
    #[serde(rename = "desc")]
    Descending,
}

/// One request against the remote feed API.
///
/// Structural equality is meaningful: the request deduper suppresses a
/// request that is field-for-field equal to the previous one in the same
/// direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRequest {
    /// The feed-spec string.
    pub spec: String,
    /// The owning account.
    pub owner: String,
    /// Maximum number of items to return.
    pub limit: u32,
    /// Only items newer than this cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since_id: Option<String>,
    /// Only items older than this cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_id: Option<String>,
    /// Requested ordering, when the feed supports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl FeedRequest {
    /// Builds a cursor-less head request for a refresh.
    pub fn refresh(scope: &FeedScope, limit: u32) -> Self {
        Self {
            spec: scope.spec.clone(),
            owner: scope.owner.clone(),
            limit,
            since_id: None,
            until_id: None,
            order: None,
        }
    }

    /// Builds an older-items request bounded by `until_id`.
    pub fn append(scope: &FeedScope, limit: u32, until_id: Option<String>) -> Self {
        Self {
            spec: scope.spec.clone(),
            owner: scope.owner.clone(),
            limit,
            since_id: None,
            until_id,
            order: None,
        }
    }
}

/// Page-level pagination cursors returned by the remote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursors {
    /// Cursor for requesting items newer than this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since_id: Option<String>,
    /// Cursor for requesting items older than this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until_id: Option<String>,
}

/// One page of feed items as returned by the remote feed API.
///
/// `paging` is mandatory in a well-formed response; its absence is a
/// protocol error surfaced by the transport wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    /// Items of this page.
    pub items: Vec<FeedItem>,
    /// Page-level pagination metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<PageCursors>,
}

impl FeedPage {
    /// Creates a page with the given items and default cursors.
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            paging: Some(PageCursors::default()),
        }
    }

    /// Creates a well-formed page with no items.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The item with the smallest `feed_created_at`, ties broken by
    /// post id for determinism.
    pub fn oldest_item(&self) -> Option<&FeedItem> {
        self.items
            .iter()
            .min_by(|a, b| item_order(a).cmp(&item_order(b)))
    }

    /// The item with the largest `feed_created_at`, ties broken by
    /// post id.
    pub fn newest_item(&self) -> Option<&FeedItem> {
        self.items
            .iter()
            .max_by(|a, b| item_order(a).cmp(&item_order(b)))
    }
}

fn item_order(item: &FeedItem) -> (i64, &str) {
    (item.feed_created_at, item.post_id.as_str())
}
