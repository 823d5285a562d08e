use thiserror::Error;

use crate::job::JobStatus;

/// Application-wide error types for Ferret.
#[derive(Error, Debug)]
pub enum AppError {
    /// The submission was rejected before any work was done.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The GET itself failed (DNS, connect, TLS, blocked address...).
    #[error("Unable to download the webpage: {0}")]
    DownloadFailed(String),

    /// Headers arrived but the body could not be read.
    #[error("Unable to read the body content: {0}")]
    BodyReadFailed(String),

    /// The page was fetched but carried no content to analyse.
    #[error("There is no content to process further (HTTP {status})")]
    NoContent { status: String },

    /// Analysis requires a 200 response with a body.
    #[error("Page not processable: {status}")]
    PageNotProcessable { status: String },

    /// A per-link classification task died before reporting back.
    #[error("Link classification task failed: {0}")]
    LinkTask(String),

    #[error("Result not found for id {0}")]
    NotFound(i64),

    /// A job record was asked to leave a terminal status.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },

    /// Result store operation failed.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns true if the error happened while talking to the target site.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            AppError::DownloadFailed(_) | AppError::BodyReadFailed(_) | AppError::NoContent { .. }
        )
    }
}

/// Failure of a single feature scan. Recovered locally by the analyser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("!Doctype node is not found in the document")]
    NoDoctype,

    #[error("Unable to parse the Doctype node {0:?}")]
    MalformedDoctype(String),

    #[error("head element not found in the document")]
    NoHeadElement,

    #[error("title node not found")]
    NoTitleNode,
}
