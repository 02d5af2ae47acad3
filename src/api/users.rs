use actix_web::{get, web, HttpResponse};
use crate::api::metrics;
use crate::services::UserService;

pub const NOT_FOUND_REASON: &str = "not found";

#[utoipa::path(
    get,
    path = "/api/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User found", body = crate::models::User),
        (status = 404, description = "not found")
    )
)]
#[get("/api/{id}")]
pub async fn get_user(service: web::Data<UserService>, path: web::Path<String>) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("👤 GET /api/{}", user_id);

    let outcome = service.lookup(&user_id).await;
    let status = outcome.status();

    match outcome.into_result() {
        Ok(user) => {
            log::info!("✅ User {} found", user_id);
            HttpResponse::build(status).json(user)
        }
        Err(e) if e.is_not_found() => {
            log::warn!("🔍 {}", e);
            not_found(status)
        }
        Err(e) => {
            // Reported as 404 like a missing row; only the log and the
            // failure counter tell them apart.
            log::error!("❌ Lookup for user {} failed: {}", user_id, e);
            metrics::increment_lookup_failure_count();
            not_found(status)
        }
    }
}

fn not_found(status: actix_web::http::StatusCode) -> HttpResponse {
    let mut response = HttpResponse::build(status)
        .content_type("text/plain; charset=utf-8")
        .body(NOT_FOUND_REASON);
    response.head_mut().reason = Some(NOT_FOUND_REASON);
    response
}
