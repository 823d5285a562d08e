use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use ferret_core::AppError;

use crate::dto::{AnalyseRequest, AnalyseResponse, HealthResponse, ResultResponse};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/analyse", get(list_results).post(analyse))
        .route("/analyse/{id}", get(get_result));

    let public = Router::new()
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Analyse
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/analyse",
    request_body = AnalyseRequest,
    responses(
        (status = 202, description = "Page fetched, analysis started", body = AnalyseResponse),
        (status = 400, description = "Missing URL", body = crate::dto::ErrorResponse),
        (status = 502, description = "Page could not be fetched", body = crate::dto::ErrorResponse),
    ),
    tag = "analyse"
)]
pub async fn analyse(
    State(state): State<Arc<AppState>>,
    axum::Json(body): axum::Json<AnalyseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.processor.submit(&body.web_url).await?;
    Ok((StatusCode::ACCEPTED, axum::Json(AnalyseResponse { id })))
}

#[utoipa::path(
    get,
    path = "/analyse",
    responses(
        (status = 200, description = "Every submitted analysis", body = [ResultResponse]),
    ),
    tag = "analyse"
)]
pub async fn list_results(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.processor.get_all().await?;
    let response: Vec<ResultResponse> = records.into_iter().map(ResultResponse::from).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    get,
    path = "/analyse/{id}",
    params(
        ("id" = i64, Path, description = "Analysis ID")
    ),
    responses(
        (status = 200, description = "Analysis result", body = ResultResponse),
        (status = 400, description = "Malformed id", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "analyse"
)]
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::InvalidRequest(format!("'{id}' is not a valid analysis id")))?;

    let record = state.processor.get_by_id(id).await?;
    Ok(axum::Json(ResultResponse::from(record)))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Result store is unavailable", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.processor.count().await {
        Ok(jobs) => (
            StatusCode::OK,
            axum::Json(HealthResponse {
                status: "healthy",
                jobs,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                axum::Json(HealthResponse {
                    status: "unhealthy",
                    jobs: 0,
                }),
            )
        }
    }
}
