use std::collections::BTreeMap;

use serde::Serialize;

/// Heading tags tracked by the heading histogram, in document-outline order.
pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Heading tag name (`h1`..`h6`) to number of start tags seen.
pub type Headings = BTreeMap<String, usize>;

/// A histogram with every heading tag present and set to zero.
pub fn empty_headings() -> Headings {
    HEADING_TAGS.iter().map(|tag| (tag.to_string(), 0)).collect()
}

/// Raw result of fetching a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedPage {
    pub status_code: u16,
    /// Status line in `"<code> <reason>"` form, e.g. `"200 OK"`.
    pub status_text: String,
    pub url: String,
    /// Absent for 4xx/5xx responses.
    #[serde(skip)]
    pub content: Option<Vec<u8>>,
}

impl FetchedPage {
    pub fn is_processable(&self) -> bool {
        self.status_code == 200 && self.content.is_some()
    }
}

/// Liveness of a discovered link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkStatus {
    Active,
    Inactive,
}

/// Status code recorded when the probe never got an HTTP response.
pub const PROBE_FAILED: i32 = -1;

/// An anchor discovered in the document, classified after probing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub name: String,
    pub url: String,
    pub is_internal: bool,
    pub status: LinkStatus,
    pub http_status_code: i32,
}

impl Link {
    /// Placeholder created at discovery time, before the probe reports back.
    pub fn discovered(url: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            url: url.into(),
            is_internal: false,
            status: LinkStatus::Inactive,
            http_status_code: PROBE_FAILED,
        }
    }
}

/// Full analysis of one fetched page.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub page: FetchedPage,
    pub links: Vec<Link>,
    pub title: String,
    pub headings: Headings,
    pub internal_link_count: usize,
    pub external_link_count: usize,
    pub active_link_count: usize,
    pub inactive_link_count: usize,
    pub page_version: String,
    pub has_login_form: bool,
}
