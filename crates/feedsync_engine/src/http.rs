//! HTTP binding for the remote feed API.
//!
//! The actual HTTP client is abstracted via a trait to allow different
//! implementations (reqwest, hyper, a platform webview bridge, or a
//! loopback client in tests). Bodies are JSON on both sides.

use crate::error::{SyncError, SyncResult};
use crate::transport::FeedApi;
use async_trait::async_trait;
use feedsync_types::{FeedPage, FeedRequest};
use parking_lot::RwLock;

/// HTTP client abstraction.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a POST request and returns the response body.
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, String>;

    /// Checks if the client is connected/healthy.
    fn is_healthy(&self) -> bool;
}

/// HTTP-based feed API.
///
/// Client-reported failures map to retryable transport errors so the
/// transport wrapper can retry them; undecodable bodies map to protocol
/// errors.
pub struct HttpFeedApi<C: HttpClient> {
    /// Base URL of the feed server (e.g., "https://feeds.example.com").
    base_url: String,
    /// HTTP client implementation.
    client: C,
    /// Last transport error message.
    last_error: RwLock<Option<String>>,
}

impl<C: HttpClient> HttpFeedApi<C> {
    /// Creates a new HTTP feed API.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            last_error: RwLock::new(None),
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the last transport error message.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    fn set_error(&self, err: &str) {
        *self.last_error.write() = Some(err.to_owned());
    }

    fn clear_error(&self) {
        *self.last_error.write() = None;
    }
}

#[async_trait]
impl<C: HttpClient> FeedApi for HttpFeedApi<C> {
    async fn get_feed_by_spec(&self, request: &FeedRequest) -> SyncResult<FeedPage> {
        if !self.client.is_healthy() {
            return Err(SyncError::transport_fatal("feed client unavailable"));
        }

        let body = serde_json::to_vec(request)
            .map_err(|e| SyncError::Protocol(format!("failed to encode request: {e}")))?;

        let url = format!("{}/feed/get", self.base_url);
        let response_body = self.client.post(&url, body).await.map_err(|e| {
            self.set_error(&e);
            SyncError::transport_retryable(e)
        })?;

        self.clear_error();

        serde_json::from_slice(&response_body)
            .map_err(|e| SyncError::Protocol(format!("failed to decode response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedsync_types::{FeedItem, FeedScope};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct TestClient {
        response: Mutex<Option<Result<Vec<u8>, String>>>,
        healthy: AtomicBool,
        seen_url: Mutex<Option<String>>,
    }

    impl TestClient {
        fn new() -> Self {
            Self {
                response: Mutex::new(None),
                healthy: AtomicBool::new(true),
                seen_url: Mutex::new(None),
            }
        }

        fn set_response(&self, response: Result<Vec<u8>, String>) {
            *self.response.lock() = Some(response);
        }
    }

    #[async_trait]
    impl HttpClient for TestClient {
        async fn post(&self, url: &str, _body: Vec<u8>) -> Result<Vec<u8>, String> {
            *self.seen_url.lock() = Some(url.to_owned());
            self.response
                .lock()
                .take()
                .unwrap_or_else(|| Err("no response set".into()))
        }

        fn is_healthy(&self) -> bool {
            self.healthy.load(Ordering::SeqCst)
        }
    }

    fn request() -> FeedRequest {
        FeedRequest::refresh(&FeedScope::new("home", "owner-1"), 25)
    }

    #[tokio::test]
    async fn decodes_page_response() {
        let client = TestClient::new();
        let page = FeedPage::new(vec![FeedItem::new("p1", 100)]);
        client.set_response(Ok(serde_json::to_vec(&page).unwrap()));

        let api = HttpFeedApi::new("https://feeds.example.com", client);
        let got = api.get_feed_by_spec(&request()).await.unwrap();

        assert_eq!(got, page);
        assert!(api.last_error().is_none());
    }

    #[tokio::test]
    async fn posts_to_feed_endpoint() {
        let client = TestClient::new();
        client.set_response(Ok(serde_json::to_vec(&FeedPage::empty()).unwrap()));

        let api = HttpFeedApi::new("https://feeds.example.com", client);
        api.get_feed_by_spec(&request()).await.unwrap();

        assert_eq!(
            api.client.seen_url.lock().as_deref(),
            Some("https://feeds.example.com/feed/get")
        );
    }

    #[tokio::test]
    async fn client_failure_maps_to_retryable_transport() {
        let client = TestClient::new();
        client.set_response(Err("connection refused".into()));

        let api = HttpFeedApi::new("https://feeds.example.com", client);
        let err = api.get_feed_by_spec(&request()).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(api.last_error().as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn unhealthy_client_is_fatal() {
        let client = TestClient::new();
        client.healthy.store(false, Ordering::SeqCst);

        let api = HttpFeedApi::new("https://feeds.example.com", client);
        let err = api.get_feed_by_spec(&request()).await.unwrap_err();

        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn undecodable_body_is_protocol_error() {
        let client = TestClient::new();
        client.set_response(Ok(b"not json".to_vec()));

        let api = HttpFeedApi::new("https://feeds.example.com", client);
        let err = api.get_feed_by_spec(&request()).await.unwrap_err();

        assert!(matches!(err, SyncError::Protocol(_)));
    }
}
