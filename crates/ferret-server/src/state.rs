use ferret_client::ReqwestClient;
use ferret_core::{InMemoryResultStore, JobProcessor, PageFetcher};

/// The production processor: reqwest for fetches and probes, results in memory.
pub type Processor = JobProcessor<PageFetcher<ReqwestClient>, ReqwestClient, InMemoryResultStore>;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub processor: Processor,
}

impl AppState {
    pub fn new(client: ReqwestClient) -> Self {
        Self {
            processor: JobProcessor::new(
                PageFetcher::new(client.clone()),
                client,
                InMemoryResultStore::new(),
            ),
        }
    }
}
