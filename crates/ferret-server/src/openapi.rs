use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ferret API",
        version = "0.1.0",
        description = "Submit a web page for analysis and poll for its structure and link health."
    ),
    paths(
        crate::routes::analyse,
        crate::routes::list_results,
        crate::routes::get_result,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::AnalyseRequest,
        crate::dto::AnalyseResponse,
        crate::dto::ResultResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "analyse", description = "Page analysis jobs"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
