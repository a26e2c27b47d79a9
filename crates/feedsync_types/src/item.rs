//! Feed items as persisted by the local store.

use serde::{Deserialize, Serialize};

/// One entry of a locally cached feed.
///
/// Within a single (spec, owner) scope, items are totally ordered by
/// `feed_created_at` descending for read purposes; the oldest and newest
/// item are well-defined whenever the set is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Identifier of the post.
    pub post_id: String,
    /// Identifier of the repost entry, when this list position is a repost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repost_id: Option<String>,
    /// Remote-side creation timestamp (epoch seconds) used for cursor
    /// ordering. For a repost this is the repost's timestamp, not the
    /// original post's.
    pub feed_created_at: i64,
    /// Remaining post payload, opaque to the sync engine.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl FeedItem {
    /// Creates an item with no repost entry and an empty payload.
    pub fn new(post_id: impl Into<String>, feed_created_at: i64) -> Self {
        Self {
            post_id: post_id.into(),
            repost_id: None,
            feed_created_at,
            payload: serde_json::Value::Null,
        }
    }

    /// Marks the item as a repost.
    pub fn with_repost(mut self, repost_id: impl Into<String>) -> Self {
        self.repost_id = Some(repost_id.into());
        self
    }

    /// Returns true if this list position is a repost.
    pub fn is_repost(&self) -> bool {
        self.repost_id.is_some()
    }
}
