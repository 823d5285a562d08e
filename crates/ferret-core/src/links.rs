//! Link discovery and verification.
//!
//! The document scan pushes a placeholder per anchor and spawns one probe
//! task for it; probes run concurrently with the rest of the scan and with
//! each other. Results are written back by index, so the returned list keeps
//! document order no matter which probe finishes first.

use tokio::task::JoinSet;
use url::{ParseError, Url};

use crate::error::AppError;
use crate::models::{Link, LinkStatus, PROBE_FAILED};
use crate::scan::tokens::{Token, tokenize};
use crate::traits::{HttpClient, HttpResponse};

/// Outcome of classifying one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkCheck {
    pub is_internal: bool,
    pub status: LinkStatus,
    pub http_status_code: i32,
}

/// Discovers anchors and verifies each one against the network.
#[derive(Clone)]
pub struct LinkExtractor<H: HttpClient> {
    client: H,
}

impl<H: HttpClient> LinkExtractor<H> {
    pub fn new(client: H) -> Self {
        Self { client }
    }

    /// Extract every `<a href>` from `html`, classified and probed.
    ///
    /// Waits for all probes before returning. If any probe task dies, the
    /// whole extraction fails and the remaining probes are aborted.
    pub async fn extract_links(&self, host_url: &str, html: &str) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = Vec::new();
        let mut probes: JoinSet<(usize, LinkCheck)> = JoinSet::new();
        let mut open_anchor: Option<usize> = None;

        for token in tokenize(html) {
            match token {
                Token::StartTag(tag) if tag.name == "a" => {
                    open_anchor = None;
                    if let Some(href) = tag.attr("href") {
                        let index = links.len();
                        links.push(Link::discovered(href));
                        open_anchor = Some(index);

                        let client = self.client.clone();
                        let host_url = host_url.to_string();
                        let href = href.to_string();
                        probes.spawn(async move {
                            (index, check_link(&client, &host_url, &href).await)
                        });
                    }
                }
                Token::Text(text) => {
                    if let Some(index) = open_anchor {
                        links[index].name.push_str(&text);
                    }
                }
                Token::EndTag(name) if name == "a" => {
                    if let Some(index) = open_anchor.take() {
                        let trimmed = links[index].name.trim().to_string();
                        links[index].name = trimmed;
                    }
                }
                _ => {}
            }
        }

        if let Some(index) = open_anchor {
            let trimmed = links[index].name.trim().to_string();
            links[index].name = trimmed;
        }

        tracing::debug!(host = %host_url, links = links.len(), "Document scanned, waiting for link probes");

        while let Some(joined) = probes.join_next().await {
            let (index, check) = joined.map_err(|e| AppError::LinkTask(e.to_string()))?;
            let link = &mut links[index];
            link.is_internal = check.is_internal;
            link.status = check.status;
            link.http_status_code = check.http_status_code;
        }

        Ok(links)
    }
}

/// Classify one link: internal or external, then live or dead.
pub async fn check_link<H: HttpClient>(client: &H, host_url: &str, href: &str) -> LinkCheck {
    let target = parse_href(host_url, href);
    let is_internal = is_internal(host_url, &target);

    let probe_url = match &target {
        Href::Relative => join_host(host_url, href),
        Href::Absolute(url) if url.host_str().is_none() => join_host(host_url, href),
        Href::Absolute(_) | Href::Invalid => href.to_string(),
    };

    let (status, http_status_code) = match client.get(&probe_url).await {
        Ok(response) => {
            let code = response.status_code();
            let status = if code == 200 {
                LinkStatus::Active
            } else {
                LinkStatus::Inactive
            };
            (status, i32::from(code))
        }
        Err(e) => {
            tracing::debug!(url = %probe_url, error = %e, "Link probe failed");
            (LinkStatus::Inactive, PROBE_FAILED)
        }
    };

    LinkCheck {
        is_internal,
        status,
        http_status_code,
    }
}

#[derive(Debug)]
enum Href {
    /// No host component: fragment, path, query...
    Relative,
    /// Parsed URL; may still lack a host (`mailto:`), in which case it is
    /// treated like a path on the page's host.
    Absolute(Url),
    Invalid,
}

fn parse_href(host_url: &str, href: &str) -> Href {
    match Url::parse(href) {
        Ok(url) => Href::Absolute(url),
        Err(ParseError::RelativeUrlWithoutBase) if href.starts_with("//") => {
            let scheme = Url::parse(host_url)
                .map(|u| u.scheme().to_string())
                .unwrap_or_else(|_| "http".to_string());
            Url::parse(&format!("{scheme}:{href}"))
                .map(Href::Absolute)
                .unwrap_or(Href::Invalid)
        }
        Err(ParseError::RelativeUrlWithoutBase) => Href::Relative,
        Err(_) => Href::Invalid,
    }
}

fn is_internal(host_url: &str, target: &Href) -> bool {
    let Ok(host) = Url::parse(host_url) else {
        return false;
    };

    match target {
        Href::Relative => true,
        Href::Absolute(url) => match url.host_str() {
            None => true,
            Some(link_host) => host
                .host_str()
                .is_some_and(|page_host| page_host.eq_ignore_ascii_case(link_host)),
        },
        Href::Invalid => false,
    }
}

/// `host_url` and `href` joined with exactly one slash.
fn join_host(host_url: &str, href: &str) -> String {
    format!(
        "{}/{}",
        host_url.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}
