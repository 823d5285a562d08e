use std::future::Future;

use crate::error::AppError;
use crate::job::JobRecord;
use crate::models::FetchedPage;

/// Minimal HTTP capability: one GET, status first, body on demand.
///
/// Used by the fetcher for the submitted page and by the link extractor for
/// liveness probes. Implementations report transport failures as
/// `AppError::DownloadFailed`.
pub trait HttpClient: Send + Sync + Clone + 'static {
    type Response: HttpResponse;

    fn get(&self, url: &str) -> impl Future<Output = Result<Self::Response, AppError>> + Send;
}

/// Response headers are in; the body has not been read yet.
pub trait HttpResponse: Send {
    fn status_code(&self) -> u16;

    /// Status line in `"<code> <reason>"` form.
    fn status_text(&self) -> String;

    /// Read the full body. Failures map to `AppError::BodyReadFailed`.
    fn bytes(self) -> impl Future<Output = Result<Vec<u8>, AppError>> + Send;
}

/// Retrieves a page for analysis.
pub trait Fetcher: Send + Sync + Clone + 'static {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage, AppError>> + Send;
}

/// Persists job records, keyed by a store-assigned id.
///
/// Implementations must serialize mutations and make a finished update
/// visible to every later read.
pub trait ResultStore: Send + Sync + Clone + 'static {
    /// Save a new record. Returns the generated id.
    fn create(&self, record: JobRecord) -> impl Future<Output = Result<i64, AppError>> + Send;

    /// Replace the record stored under `id`. Fails with `NotFound` if absent.
    fn update(
        &self,
        id: i64,
        record: JobRecord,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn get(&self, id: i64) -> impl Future<Output = Result<JobRecord, AppError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<JobRecord>, AppError>> + Send;

    /// Number of stored records, without copying them.
    fn count(&self) -> impl Future<Output = Result<usize, AppError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), AppError>> + Send;
}
