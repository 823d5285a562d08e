pub mod analysis;
pub mod error;
pub mod fetch;
pub mod job;
pub mod links;
pub mod models;
pub mod processor;
pub mod scan;
pub mod store;
pub mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use analysis::Analyser;
pub use error::{AppError, ScanError};
pub use fetch::PageFetcher;
pub use job::{JobRecord, JobStatus};
pub use links::LinkExtractor;
pub use models::{Analysis, FetchedPage, Headings, Link, LinkStatus};
pub use processor::JobProcessor;
pub use store::InMemoryResultStore;
pub use traits::{Fetcher, HttpClient, HttpResponse, ResultStore};
