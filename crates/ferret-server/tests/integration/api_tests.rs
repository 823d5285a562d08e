use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::common::{body_json, post_json, setup_test_app};

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Integration Page</title>
</head>
<body>
    <h1>Welcome</h1>
    <h2>One</h2>
    <h3>Two</h3>
    <a href="/ok">Working</a>
    <a href="/dead">Broken</a>
    <form action="/session" method="post">
        <input type="email" name="email">
        <input type="password" name="password">
        <input type="submit" value="Sign In">
    </form>
</body>
</html>"#;

async fn site() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["jobs"], 0);
}

#[tokio::test]
async fn submitted_page_is_analysed() {
    let server = site().await;
    let app = setup_test_app();

    let response = app
        .router
        .clone()
        .oneshot(post_json("/analyse", json!({ "webUrl": server.uri() })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_json(response).await;
    assert_eq!(json["id"], 1);

    app.state.processor.drain().await;

    let response = app
        .router
        .oneshot(Request::get("/analyse/1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["url"], server.uri());
    assert_eq!(json["processStatus"], "Completed");
    assert_eq!(json["title"], "Integration Page");
    assert_eq!(json["pageVersion"], "HTML5 and beyond");
    assert_eq!(json["headings"]["h1"], 1);
    assert_eq!(json["headings"]["h2"], 1);
    assert_eq!(json["headings"]["h3"], 1);
    assert_eq!(json["headings"]["h4"], 0);
    assert_eq!(json["internalLinkCount"], 2);
    assert_eq!(json["externalLinkCount"], 0);
    assert_eq!(json["activeLinkCount"], 1);
    assert_eq!(json["inactiveLinkCount"], 1);
    assert_eq!(json["hasLoginForm"], true);
    assert!(json["requested"].is_string());
    assert!(json["completed"].is_string());
}

#[tokio::test]
async fn blank_url_returns_400() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(post_json("/analyse", json!({ "webUrl": "  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid_request");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(
            Request::post("/analyse")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn unreachable_page_returns_502_and_creates_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = setup_test_app();

    let response = app
        .router
        .clone()
        .oneshot(post_json("/analyse", json!({ "webUrl": server.uri() })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "fetch_error");

    let response = app
        .router
        .oneshot(Request::get("/analyse").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn unknown_id_returns_404() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(Request::get("/analyse/999").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn non_numeric_id_returns_400() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(Request::get("/analyse/abc").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_returns_every_job() {
    let server = site().await;
    let app = setup_test_app();

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/analyse", json!({ "webUrl": server.uri() })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
    app.state.processor.drain().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/analyse").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[1]["id"], 2);

    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await["jobs"], 2);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup_test_app();

    let response = app
        .router
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/analyse"].is_object());
    assert!(json["paths"]["/analyse/{id}"].is_object());
}
