//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::AppError;
use crate::job::JobRecord;
use crate::models::FetchedPage;
use crate::store::InMemoryResultStore;
use crate::traits::{Fetcher, HttpClient, HttpResponse, ResultStore};

/// Reason phrase for the status codes tests care about.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        301 => "Moved Permanently",
        304 => "Not Modified",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "",
    }
}

// ---------------------------------------------------------------------------
// MockHttpClient
// ---------------------------------------------------------------------------

/// What a mocked GET produces.
#[derive(Debug, Clone)]
pub enum MockReply {
    Response { status: u16, body: Vec<u8> },
    /// Headers arrive, then reading the body fails.
    BodyError { status: u16, message: String },
    TransportError(String),
}

impl MockReply {
    pub fn html(body: &str) -> Self {
        MockReply::Response {
            status: 200,
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        MockReply::Response {
            status,
            body: Vec::new(),
        }
    }

    pub fn body_error(message: &str) -> Self {
        MockReply::BodyError {
            status: 200,
            message: message.to_string(),
        }
    }

    pub fn transport_error(message: &str) -> Self {
        MockReply::TransportError(message.to_string())
    }
}

/// HTTP client with per-URL programmable replies.
///
/// URLs without a reply get the fallback, or a transport error if none is set.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    fallback: Arc<Mutex<Option<MockReply>>>,
    /// Every URL requested, in call order.
    pub requests: Arc<Mutex<Vec<String>>>,
    body_reads: Arc<AtomicUsize>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, url: &str, reply: MockReply) -> Self {
        self.replies.lock().unwrap().insert(url.to_string(), reply);
        self
    }

    pub fn with_fallback(self, reply: MockReply) -> Self {
        *self.fallback.lock().unwrap() = Some(reply);
        self
    }

    /// Delay the reply for `url`, to force out-of-order completion.
    pub fn with_delay(self, url: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(url.to_string(), delay);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn body_reads(&self) -> usize {
        self.body_reads.load(Ordering::SeqCst)
    }
}

impl HttpClient for MockHttpClient {
    type Response = MockResponse;

    async fn get(&self, url: &str) -> Result<MockResponse, AppError> {
        self.requests.lock().unwrap().push(url.to_string());

        let delay = self.delays.lock().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = {
            let replies = self.replies.lock().unwrap();
            replies
                .get(url)
                .cloned()
                .or_else(|| self.fallback.lock().unwrap().clone())
        };

        let (status, body) = match reply {
            Some(MockReply::Response { status, body }) => (status, Ok(body)),
            Some(MockReply::BodyError { status, message }) => (status, Err(message)),
            Some(MockReply::TransportError(message)) => {
                return Err(AppError::DownloadFailed(message));
            }
            None => {
                return Err(AppError::DownloadFailed(format!("no mock reply for {url}")));
            }
        };

        Ok(MockResponse {
            status,
            body,
            body_reads: Arc::clone(&self.body_reads),
        })
    }
}

pub struct MockResponse {
    status: u16,
    body: Result<Vec<u8>, String>,
    body_reads: Arc<AtomicUsize>,
}

impl HttpResponse for MockResponse {
    fn status_code(&self) -> u16 {
        self.status
    }

    fn status_text(&self) -> String {
        format!("{} {}", self.status, reason_phrase(self.status))
    }

    async fn bytes(self) -> Result<Vec<u8>, AppError> {
        self.body_reads.fetch_add(1, Ordering::SeqCst);
        self.body.map_err(AppError::BodyReadFailed)
    }
}

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns queued pages.
#[derive(Clone)]
pub struct MockFetcher {
    /// Queue of responses. Each call pops the first element.
    /// If empty, returns a minimal 200 page for the requested URL.
    responses: Arc<Mutex<Vec<Result<FetchedPage, AppError>>>>,
    pub fetched: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(page: FetchedPage) -> Self {
        Self::with_responses(vec![Ok(page)])
    }

    pub fn with_error(error: AppError) -> Self {
        Self::with_responses(vec![Err(error)])
    }

    pub fn with_responses(responses: Vec<Result<FetchedPage, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            fetched: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, AppError> {
        self.fetched.lock().unwrap().push(url.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(make_page(url, "<!DOCTYPE html><html><head><title>default</title></head></html>"))
        } else {
            responses.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// MockStore
// ---------------------------------------------------------------------------

/// In-memory store with injectable one-shot failures.
#[derive(Clone, Default)]
pub struct MockStore {
    pub inner: InMemoryResultStore,
    get_error: Arc<Mutex<Option<AppError>>>,
    update_error: Arc<Mutex<Option<AppError>>>,
    /// Every record passed to `update`, in call order.
    pub updates: Arc<Mutex<Vec<JobRecord>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `get` fails with `error`.
    pub fn with_get_error(self, error: AppError) -> Self {
        *self.get_error.lock().unwrap() = Some(error);
        self
    }

    /// The next `update` fails with `error`.
    pub fn with_update_error(self, error: AppError) -> Self {
        *self.update_error.lock().unwrap() = Some(error);
        self
    }
}

impl ResultStore for MockStore {
    async fn create(&self, record: JobRecord) -> Result<i64, AppError> {
        self.inner.create(record).await
    }

    async fn update(&self, id: i64, record: JobRecord) -> Result<(), AppError> {
        self.updates.lock().unwrap().push(record.clone());
        let injected = self.update_error.lock().unwrap().take();
        if let Some(e) = injected {
            return Err(e);
        }
        self.inner.update(id, record).await
    }

    async fn get(&self, id: i64) -> Result<JobRecord, AppError> {
        let injected = self.get_error.lock().unwrap().take();
        if let Some(e) = injected {
            return Err(e);
        }
        self.inner.get(id).await
    }

    async fn get_all(&self) -> Result<Vec<JobRecord>, AppError> {
        self.inner.get_all().await
    }

    async fn count(&self) -> Result<usize, AppError> {
        self.inner.count().await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.inner.delete(id).await
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// A fetched 200 page with the given HTML.
pub fn make_page(url: &str, html: &str) -> FetchedPage {
    FetchedPage {
        status_code: 200,
        status_text: "200 OK".to_string(),
        url: url.to_string(),
        content: Some(html.as_bytes().to_vec()),
    }
}
