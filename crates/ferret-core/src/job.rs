use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Analysis, Headings, empty_headings};

/// Processing status of an analysis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Created,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Created => "Created",
            JobStatus::Completed => "Completed",
            JobStatus::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Persisted state of one submitted analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    /// Assigned by the result store on create; 0 until then.
    pub id: i64,
    pub url: String,
    pub requested_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub title: String,
    pub headings: Headings,
    pub internal_link_count: usize,
    pub external_link_count: usize,
    pub active_link_count: usize,
    pub inactive_link_count: usize,
    pub page_version: String,
    pub has_login_form: bool,
}

impl JobRecord {
    /// New record in `Created` state, requested now.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: 0,
            url: url.into(),
            requested_at: Utc::now(),
            completed_at: None,
            status: JobStatus::Created,
            title: String::new(),
            headings: empty_headings(),
            internal_link_count: 0,
            external_link_count: 0,
            active_link_count: 0,
            inactive_link_count: 0,
            page_version: String::new(),
            has_login_form: false,
        }
    }

    /// Copy the analysis results in and move to `Completed`.
    pub fn complete(&mut self, analysis: &Analysis, at: DateTime<Utc>) -> Result<(), AppError> {
        self.ensure_can_move_to(JobStatus::Completed)?;

        self.completed_at = Some(at);
        self.status = JobStatus::Completed;
        self.title = analysis.title.clone();
        self.headings = analysis.headings.clone();
        self.internal_link_count = analysis.internal_link_count;
        self.external_link_count = analysis.external_link_count;
        self.active_link_count = analysis.active_link_count;
        self.inactive_link_count = analysis.inactive_link_count;
        self.page_version = analysis.page_version.clone();
        self.has_login_form = analysis.has_login_form;
        Ok(())
    }

    /// Move to `Failed`, leaving every other field untouched.
    pub fn fail(&mut self) -> Result<(), AppError> {
        self.ensure_can_move_to(JobStatus::Failed)?;
        self.status = JobStatus::Failed;
        Ok(())
    }

    fn ensure_can_move_to(&self, to: JobStatus) -> Result<(), AppError> {
        if self.status.is_terminal() {
            return Err(AppError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        Ok(())
    }
}
