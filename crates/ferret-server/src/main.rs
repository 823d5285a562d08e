use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ferret_client::ReqwestClient;
use ferret_server::config::ServerConfig;
use ferret_server::routes;
use ferret_server::state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ferret=info".parse()?))
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;
    let client = ReqwestClient::with_timeout(config.http_timeout)?
        .block_private_urls(config.block_private_urls);

    let state = Arc::new(AppState::new(client));

    let app = routes::router(Arc::clone(&state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(
        %addr,
        timeout_secs = config.http_timeout.as_secs(),
        block_private_urls = config.block_private_urls,
        "Starting server"
    );
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(in_flight = state.processor.in_flight(), "Waiting for running analyses");
    state.processor.drain().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
