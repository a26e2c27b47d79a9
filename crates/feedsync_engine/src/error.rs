//! Error types for the sync engine.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during sync operations.
///
/// Soft terminal states (no boundary to paginate from, a repeated request
/// suppressed by the deduper) are not errors; they surface as
/// `LoadOutcome::EndOfPagination`.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Network or transport error.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the transport wrapper may retry the call once.
        retryable: bool,
    },

    /// The remote responded without required pagination metadata, or with
    /// a body that cannot be decoded.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The persisted store or the feed processor failed.
    #[error("store error: {0}")]
    Store(String),

    /// A boundary item exists but has no persisted cursor record.
    #[error("no remote key for boundary post {post_id}")]
    MissingRemoteKey {
        /// Post identifier of the boundary item.
        post_id: String,
    },
}

impl SyncError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Creates a store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Returns true if the transport wrapper may transparently retry the
    /// failed call. Protocol failures are never retried internally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Transport { retryable: true, .. })
    }

    /// The coarse kind surfaced to the paged-list controller.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Transport { .. } => ErrorKind::Transport,
            SyncError::Protocol(_) => ErrorKind::Protocol,
            SyncError::Store(_) => ErrorKind::Store,
            SyncError::MissingRemoteKey { .. } => ErrorKind::MissingRemoteKey,
        }
    }
}

/// Coarse error classification carried by `LoadOutcome::RetryableError`.
///
/// Every kind is retryable from the controller's point of view: the user
/// may trigger the load again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network-level failure (already retried once by the wrapper).
    Transport,
    /// Malformed or incomplete remote response.
    Protocol,
    /// Persisted store or processor failure.
    Store,
    /// A boundary item has no cursor record; structural inconsistency in
    /// the local cache.
    MissingRemoteKey,
}
