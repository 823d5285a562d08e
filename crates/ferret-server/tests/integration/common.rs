use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;

use ferret_client::ReqwestClient;
use ferret_server::routes;
use ferret_server::state::AppState;

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

/// Router over a real reqwest client; point it at a wiremock server.
pub fn setup_test_app() -> TestApp {
    let client = ReqwestClient::with_timeout(Duration::from_secs(5)).expect("Failed to build client");
    let state = Arc::new(AppState::new(client));

    TestApp {
        router: routes::router(Arc::clone(&state)),
        state,
    }
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
