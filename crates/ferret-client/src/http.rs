use std::net::IpAddr;
use std::time::Duration;

use ferret_core::error::AppError;
use ferret_core::traits::{HttpClient, HttpResponse};
use reqwest::Client;
use url::Url;

const USER_AGENT: &str = concat!("Ferret/", env!("CARGO_PKG_VERSION"), " (page analyser)");

/// HTTP client using reqwest, shared by the page fetch and every link probe.
///
/// Private-address blocking is **off** by default: an analyser probes
/// whatever a page links to. Turn it on with
/// [`block_private_urls`](Self::block_private_urls) when the service is
/// exposed to untrusted submitters.
#[derive(Clone)]
pub struct ReqwestClient {
    client: Client,
    timeout_secs: u64,
    ssrf_protection: bool,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
            ssrf_protection: false,
        })
    }

    /// Refuse requests that resolve to private or reserved addresses.
    pub fn block_private_urls(mut self, enabled: bool) -> Self {
        self.ssrf_protection = enabled;
        self
    }
}

impl HttpClient for ReqwestClient {
    type Response = ReqwestResponse;

    async fn get(&self, url: &str) -> Result<ReqwestResponse, AppError> {
        if self.ssrf_protection {
            validate_url(url).await?;
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::DownloadFailed(format!("request timed out after {}s", self.timeout_secs))
            } else if e.is_connect() {
                AppError::DownloadFailed(format!("Connection failed: {e}"))
            } else {
                AppError::DownloadFailed(e.to_string())
            }
        })?;

        tracing::debug!(%url, status = response.status().as_u16(), "GET");
        Ok(ReqwestResponse(response))
    }
}

/// A reqwest response whose body has not been read yet.
#[derive(Debug)]
pub struct ReqwestResponse(reqwest::Response);

impl HttpResponse for ReqwestResponse {
    fn status_code(&self) -> u16 {
        self.0.status().as_u16()
    }

    fn status_text(&self) -> String {
        let status = self.0.status();
        match status.canonical_reason() {
            Some(reason) => format!("{} {reason}", status.as_u16()),
            None => status.as_u16().to_string(),
        }
    }

    async fn bytes(self) -> Result<Vec<u8>, AppError> {
        self.0
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| AppError::BodyReadFailed(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SSRF protection
// ---------------------------------------------------------------------------

/// Reject URLs that are not http(s) or that resolve to a private/reserved IP.
async fn validate_url(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::DownloadFailed(format!("Invalid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::DownloadFailed(format!(
                "URL scheme '{scheme}' is not allowed (only http/https)"
            )));
        }
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::DownloadFailed("URL has no host".to_string()))?;

    // IPv6 literals come back bracketed from host_str
    let literal = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = literal.parse::<IpAddr>() {
        if is_private_ip(ip) {
            return Err(AppError::DownloadFailed(format!(
                "Blocked: {host} is a private/reserved address"
            )));
        }
        return Ok(());
    }

    let port = parsed.port_or_known_default().unwrap_or(80);
    let addrs: Vec<_> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| AppError::DownloadFailed(format!("DNS resolution failed for {host}: {e}")))?
        .collect();

    if addrs.is_empty() {
        return Err(AppError::DownloadFailed(format!(
            "DNS resolution returned no addresses for {host}"
        )));
    }

    if let Some(blocked) = addrs.iter().find(|addr| is_private_ip(addr.ip())) {
        return Err(AppError::DownloadFailed(format!(
            "Blocked: {host} resolves to private/reserved address {}",
            blocked.ip()
        )));
    }

    Ok(())
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.is_documentation()
                || (a == 100 && (b & 0xC0) == 64) // 100.64.0.0/10
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            v6.is_loopback()
                || v6.is_unspecified()
                || (first & 0xFFC0) == 0xFE80 // fe80::/10
                || (first & 0xFE00) == 0xFC00 // fc00::/7
                || v6
                    .to_ipv4_mapped()
                    .is_some_and(|v4| is_private_ip(IpAddr::V4(v4)))
        }
    }
}
