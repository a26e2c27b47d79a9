//! Remote feed API contract and retry wrapper.
//!
//! The transport itself (HTTP client, connection handling) is an external
//! collaborator behind the [`FeedApi`] trait. The wrapper in this module
//! owns the retry policy: one transparent retry after a fixed delay for
//! transient transport failures, nothing else.

use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use feedsync_types::{FeedPage, FeedRequest};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Network access to the remote feed endpoint.
///
/// Calls suspend only the invoking task; dropping the returned future
/// aborts the in-flight request.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Fetches one page of the feed identified by the request.
    async fn get_feed_by_spec(&self, request: &FeedRequest) -> SyncResult<FeedPage>;
}

/// Sends a request with the engine's retry policy.
///
/// A transient transport failure is retried exactly once after
/// `retry_delay`; a second transient failure propagates. A response
/// lacking pagination metadata is a protocol failure and is never retried
/// here — the controller may still re-request on user action.
pub async fn fetch_page(
    api: &dyn FeedApi,
    request: &FeedRequest,
    retry_delay: Duration,
) -> SyncResult<FeedPage> {
    let page = match api.get_feed_by_spec(request).await {
        Ok(page) => page,
        Err(err) if err.is_retryable() => {
            tracing::debug!(error = %err, "transient transport failure, retrying once");
            tokio::time::sleep(retry_delay).await;
            api.get_feed_by_spec(request).await?
        }
        Err(err) => return Err(err),
    };

    if page.paging.is_none() {
        return Err(SyncError::Protocol(
            "response missing pagination metadata".into(),
        ));
    }

    Ok(page)
}

/// A scripted feed API for tests.
///
/// Responses are consumed in FIFO order; every call is counted and its
/// request recorded. An exhausted script yields a fatal transport error.
#[derive(Default)]
pub struct MockFeedApi {
    responses: Mutex<VecDeque<SyncResult<FeedPage>>>,
    requests: Mutex<Vec<FeedRequest>>,
    calls: AtomicU64,
}

impl MockFeedApi {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful page response.
    pub fn push_page(&self, page: FeedPage) {
        self.responses.lock().push_back(Ok(page));
    }

    /// Queues an error response.
    pub fn push_error(&self, error: SyncError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Number of calls made against this mock.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request seen, in call order.
    pub fn requests(&self) -> Vec<FeedRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl FeedApi for MockFeedApi {
    async fn get_feed_by_spec(&self, request: &FeedRequest) -> SyncResult<FeedPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(SyncError::transport_fatal("no scripted response")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedsync_types::{FeedItem, FeedScope};

    fn request() -> FeedRequest {
        FeedRequest::refresh(&FeedScope::new("home", "owner-1"), 25)
    }

    fn page() -> FeedPage {
        FeedPage::new(vec![FeedItem::new("p1", 100)])
    }

    #[tokio::test]
    async fn success_on_first_attempt() {
        let api = MockFeedApi::new();
        api.push_page(page());

        let got = fetch_page(&api, &request(), Duration::ZERO).await.unwrap();
        assert_eq!(got.items.len(), 1);
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn transient_failure_retried_once() {
        let api = MockFeedApi::new();
        api.push_error(SyncError::transport_retryable("connection reset"));
        api.push_page(page());

        let got = fetch_page(&api, &request(), Duration::ZERO).await.unwrap();
        assert_eq!(got.items.len(), 1);
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn second_transient_failure_propagates() {
        let api = MockFeedApi::new();
        api.push_error(SyncError::transport_retryable("connection reset"));
        api.push_error(SyncError::transport_retryable("connection reset"));

        let err = fetch_page(&api, &request(), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Transport { .. }));
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn fatal_transport_failure_is_not_retried() {
        let api = MockFeedApi::new();
        api.push_error(SyncError::transport_fatal("certificate rejected"));

        let err = fetch_page(&api, &request(), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SyncError::Transport {
                retryable: false,
                ..
            }
        ));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn missing_paging_is_protocol_error_without_retry() {
        let api = MockFeedApi::new();
        api.push_page(FeedPage {
            items: vec![FeedItem::new("p1", 100)],
            paging: None,
        });

        let err = fetch_page(&api, &request(), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Protocol(_)));
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn mock_records_requests_in_order() {
        let api = MockFeedApi::new();
        api.push_page(page());
        api.push_page(page());

        let first = request();
        let second = FeedRequest::append(&FeedScope::new("home", "owner-1"), 25, Some("c1".into()));
        api.get_feed_by_spec(&first).await.unwrap();
        api.get_feed_by_spec(&second).await.unwrap();

        assert_eq!(api.requests(), vec![first, second]);
    }
}
