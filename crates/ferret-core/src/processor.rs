use chrono::Utc;
use tokio_util::task::TaskTracker;

use crate::analysis::Analyser;
use crate::error::AppError;
use crate::job::JobRecord;
use crate::models::FetchedPage;
use crate::traits::{Fetcher, HttpClient, ResultStore};

/// Accepts submissions and runs each analysis as a tracked background task.
///
/// Generic over all external dependencies via traits, so tests can swap in
/// mocks for the fetcher, the probe client and the store.
pub struct JobProcessor<F, H, S>
where
    F: Fetcher,
    H: HttpClient,
    S: ResultStore,
{
    fetcher: F,
    analyser: Analyser<H>,
    store: S,
    tracker: TaskTracker,
}

impl<F, H, S> JobProcessor<F, H, S>
where
    F: Fetcher,
    H: HttpClient,
    S: ResultStore,
{
    pub fn new(fetcher: F, client: H, store: S) -> Self {
        Self {
            fetcher,
            analyser: Analyser::new(client),
            store,
            tracker: TaskTracker::new(),
        }
    }

    /// Fetch `url`, persist a `Created` record and start the analysis.
    ///
    /// Returns as soon as the record exists. Fetch failures are returned to
    /// the caller and leave no record behind.
    pub async fn submit(&self, url: &str) -> Result<i64, AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::InvalidRequest("webUrl must not be empty".into()));
        }

        let page = self.fetcher.fetch(url).await?;
        if page.content.is_none() {
            return Err(AppError::NoContent {
                status: page.status_text,
            });
        }

        let id = self.store.create(JobRecord::new(url)).await?;
        tracing::info!(job_id = id, %url, status = %page.status_text, "Job created");

        self.tracker
            .spawn(run_job(self.store.clone(), self.analyser.clone(), id, page));

        Ok(id)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<JobRecord, AppError> {
        self.store.get(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<JobRecord>, AppError> {
        self.store.get_all().await
    }

    /// Number of submitted jobs, finished or not.
    pub async fn count(&self) -> Result<usize, AppError> {
        self.store.count().await
    }

    /// Number of background jobs still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait for every background job spawned so far.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

async fn run_job<H, S>(store: S, analyser: Analyser<H>, id: i64, page: FetchedPage)
where
    H: HttpClient,
    S: ResultStore,
{
    let mut record = match store.get(id).await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(job_id = id, error = %e, "Job record disappeared, abandoning job");
            return;
        }
    };

    let transition = match analyser.analyse(&page).await {
        Ok(analysis) => record.complete(&analysis, Utc::now()),
        Err(e) => {
            tracing::warn!(job_id = id, url = %record.url, error = %e, "Analysis failed");
            record.fail()
        }
    };
    if let Err(e) = transition {
        tracing::error!(job_id = id, error = %e, "Job record is already finished");
        return;
    }

    let status = record.status;
    match store.update(id, record).await {
        Ok(()) => tracing::info!(job_id = id, %status, "Job finished"),
        Err(e) => tracing::error!(job_id = id, %status, error = %e, "Failed to persist job result"),
    }
}
