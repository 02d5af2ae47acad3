pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

use actix_web::web;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/health/ready", web::get().to(health::readiness_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(users::get_user);
}
