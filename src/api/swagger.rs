use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Lookup Service API",
        version = "1.0.0",
        description = "Read-only lookup of user records by identifier.\n\n**Note:** every failed lookup, including database failures, is answered with `404 not found`."
    ),
    paths(
        // Users
        crate::api::users::get_user,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::health::readiness_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::User,
            crate::api::health::HealthResponse,
            crate::api::health::ReadinessResponse,
        )
    ),
    tags(
        (name = "Users", description = "User record lookup."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
