//! # Feedsync Types
//!
//! Feed classification and data model types for feedsync.
//!
//! This crate provides:
//! - `FeedKind` classification over feed-spec strings
//! - `FeedScope` identifying one feed instance (spec + owner)
//! - `FeedItem` as read from the persisted store
//! - `RemoteKey` pagination cursor records
//! - Wire types for the remote feed API (`FeedRequest`, `FeedPage`)
//!
//! This is a pure data crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod item;
mod messages;
mod remote_key;
mod spec;

pub use item::FeedItem;
pub use messages::{FeedPage, FeedRequest, LoadDirection, PageCursors, SortOrder};
pub use remote_key::RemoteKey;
pub use spec::{FeedKind, FeedScope};
