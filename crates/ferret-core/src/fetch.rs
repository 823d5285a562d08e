use crate::error::AppError;
use crate::models::FetchedPage;
use crate::traits::{Fetcher, HttpClient, HttpResponse};

/// Fetcher over any [`HttpClient`].
///
/// A 4xx/5xx response is a successful fetch with no content; callers decide
/// what to do with it.
#[derive(Clone)]
pub struct PageFetcher<H: HttpClient> {
    client: H,
}

impl<H: HttpClient> PageFetcher<H> {
    pub fn new(client: H) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> Fetcher for PageFetcher<H> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, AppError> {
        let response = self.client.get(url).await?;
        let status_code = response.status_code();
        let status_text = response.status_text();

        if status_code >= 400 {
            tracing::warn!(%url, status = %status_text, "Page returned an error status");
            return Ok(FetchedPage {
                status_code,
                status_text,
                url: url.to_string(),
                content: None,
            });
        }

        let content = response.bytes().await?;
        tracing::debug!(%url, bytes = content.len(), "Fetched page");

        Ok(FetchedPage {
            status_code,
            status_text,
            url: url.to_string(),
            content: Some(content),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockHttpClient, MockReply};

    const URL: &str = "http://test.com";

    #[tokio::test]
    async fn transport_error_is_download_failed() {
        let client = MockHttpClient::new().with(URL, MockReply::transport_error("test failure"));
        let err = PageFetcher::new(client).fetch(URL).await.unwrap_err();

        assert!(matches!(err, AppError::DownloadFailed(_)));
        assert_eq!(err.to_string(), "Unable to download the webpage: test failure");
    }

    #[tokio::test]
    async fn error_status_returns_page_without_content() {
        let client = MockHttpClient::new().with(URL, MockReply::status(404));
        let page = PageFetcher::new(client.clone()).fetch(URL).await.unwrap();

        assert_eq!(
            page,
            FetchedPage {
                status_code: 404,
                status_text: "404 Not Found".into(),
                url: URL.into(),
                content: None,
            }
        );
        assert_eq!(client.body_reads(), 0);
    }

    #[tokio::test]
    async fn success_returns_content() {
        let client = MockHttpClient::new().with(URL, MockReply::html("test content"));
        let page = PageFetcher::new(client).fetch(URL).await.unwrap();

        assert_eq!(page.status_code, 200);
        assert_eq!(page.status_text, "200 OK");
        assert_eq!(page.url, URL);
        assert_eq!(page.content.as_deref(), Some(b"test content".as_slice()));
    }

    #[tokio::test]
    async fn redirect_class_status_still_reads_body() {
        let client = MockHttpClient::new().with(URL, MockReply::status(304));
        let page = PageFetcher::new(client).fetch(URL).await.unwrap();

        assert_eq!(page.status_code, 304);
        assert_eq!(page.content, Some(Vec::new()));
    }

    #[tokio::test]
    async fn body_read_failure_is_reported() {
        let client = MockHttpClient::new().with(URL, MockReply::body_error("connection reset"));
        let err = PageFetcher::new(client).fetch(URL).await.unwrap_err();

        assert!(matches!(err, AppError::BodyReadFailed(_)));
    }
}
