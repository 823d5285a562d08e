//! Tests for the reqwest client against a wiremock server.

use std::time::Duration;

use ferret_client::ReqwestClient;
use ferret_core::error::AppError;
use ferret_core::fetch::PageFetcher;
use ferret_core::links::LinkExtractor;
use ferret_core::models::LinkStatus;
use ferret_core::traits::{Fetcher, HttpClient, HttpResponse};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> ReqwestClient {
    ReqwestClient::with_timeout(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn get_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let response = client().get(&server.uri()).await.unwrap();
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.status_text(), "200 OK");
    assert_eq!(response.bytes().await.unwrap(), b"<html></html>");
}

#[tokio::test]
async fn fetcher_leaves_error_pages_without_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let page = PageFetcher::new(client()).fetch(&url).await.unwrap();

    assert_eq!(page.status_code, 404);
    assert_eq!(page.status_text, "404 Not Found");
    assert_eq!(page.url, url);
    assert!(page.content.is_none());
}

#[tokio::test]
async fn connection_refused_is_download_failed() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = client()
        .get(&format!("http://127.0.0.1:{port}/"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DownloadFailed(_)));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let client = ReqwestClient::with_timeout(Duration::from_millis(200)).unwrap();
    let err = client.get(&server.uri()).await.unwrap_err();
    assert!(matches!(err, AppError::DownloadFailed(_)));
}

#[tokio::test]
async fn private_address_is_blocked_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client()
        .block_private_urls(true)
        .get(&server.uri())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Blocked"));
}

#[tokio::test]
async fn links_are_probed_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let html = format!(
        r#"<html><body>
        <a href="/ok">ok</a>
        <a href="{}/broken">broken</a>
        </body></html>"#,
        server.uri()
    );

    let links = LinkExtractor::new(client())
        .extract_links(&server.uri(), &html)
        .await
        .unwrap();

    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|l| l.is_internal));
    assert_eq!(links[0].status, LinkStatus::Active);
    assert_eq!(links[0].http_status_code, 200);
    assert_eq!(links[1].status, LinkStatus::Inactive);
    assert_eq!(links[1].http_status_code, 500);
}
