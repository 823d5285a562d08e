use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ferret_core::JobRecord;

// ---------------------------------------------------------------------------
// Analyse
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyseRequest {
    /// Absolute URL of the page to analyse.
    #[schema(example = "https://www.rust-lang.org")]
    pub web_url: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AnalyseResponse {
    pub id: i64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponse {
    pub id: i64,
    pub url: String,
    pub requested: DateTime<Utc>,
    pub completed: Option<DateTime<Utc>>,
    /// `Created`, `Completed` or `Failed`.
    pub process_status: String,
    pub title: String,
    pub headings: BTreeMap<String, usize>,
    pub internal_link_count: usize,
    pub external_link_count: usize,
    pub active_link_count: usize,
    pub inactive_link_count: usize,
    pub page_version: String,
    pub has_login_form: bool,
}

impl From<JobRecord> for ResultResponse {
    fn from(record: JobRecord) -> Self {
        Self {
            id: record.id,
            url: record.url,
            requested: record.requested_at,
            completed: record.completed_at,
            process_status: record.status.to_string(),
            title: record.title,
            headings: record.headings,
            internal_link_count: record.internal_link_count,
            external_link_count: record.external_link_count,
            active_link_count: record.active_link_count,
            inactive_link_count: record.inactive_link_count,
            page_version: record.page_version,
            has_login_form: record.has_login_form,
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Number of jobs known to the result store.
    pub jobs: usize,
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
