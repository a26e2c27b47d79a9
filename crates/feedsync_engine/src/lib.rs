//! # Feedsync Engine
//!
//! Client-side feed cache synchronization for feedsync.
//!
//! This crate provides:
//! - `SyncEngine`, the per-feed-instance load/initialize state machine
//! - Boundary queries over the persisted store
//! - Durable pagination-cursor storage (`RemoteKeyStore`)
//! - Duplicate-request suppression (`RequestDeduper`)
//! - A remote feed API contract with a single-retry transport wrapper
//! - An HTTP/JSON binding over a pluggable HTTP client
//!
//! ## Architecture
//!
//! The engine sits between a generic paged-list controller and three
//! external collaborators reached through narrow trait contracts: the
//! persisted store (reads and orphan deletion), the feed processor
//! (page persistence) and the remote feed API (network). The controller
//! calls `initialize` once per feed-instance lifetime, then `load` per
//! scroll direction; every call resolves to a tagged outcome rather than
//! an error.
//!
//! ## Key Invariants
//!
//! - All durable state is keyed by (feed spec, owner); unrelated feed
//!   instances never contend
//! - Clearing a feed's cursors is atomic with respect to concurrent reads
//! - A transient transport failure is retried exactly once; protocol
//!   failures are never retried internally
//! - Soft terminal states (no boundary, suppressed repeat) surface as
//!   end-of-pagination, not as errors
//! - Dropping an in-flight `load` future cancels the network call

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod boundary;
mod clock;
mod config;
mod dedupe;
mod engine;
mod error;
mod http;
mod processor;
mod remote_keys;
mod store;
mod transport;

pub use boundary::{BoundaryEdge, BoundaryQuery, RepostHandling};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::SyncConfig;
pub use dedupe::RequestDeduper;
pub use engine::{InitializeOutcome, LoadOutcome, SyncEngine};
pub use error::{ErrorKind, SyncError, SyncResult};
pub use http::{HttpClient, HttpFeedApi};
pub use processor::{FeedProcessor, MemoryFeedProcessor};
pub use remote_keys::{MemoryRemoteKeyStore, RemoteKeyStore};
pub use store::{FeedStore, MemoryFeedStore};
pub use transport::{fetch_page, FeedApi, MockFeedApi};
