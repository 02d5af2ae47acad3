use actix_web::HttpResponse;
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static LOOKUP_FAILURE_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Lookups that failed in the accessor but were answered with a 404.
pub fn increment_lookup_failure_count() {
    LOOKUP_FAILURE_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub struct MetricsResponse {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub user_lookup_failures_total: u64,
}

impl MetricsResponse {
    pub fn snapshot() -> Self {
        Self {
            http_requests_total: REQUEST_COUNT.load(Ordering::Relaxed),
            http_errors_total: ERROR_COUNT.load(Ordering::Relaxed),
            user_lookup_failures_total: LOOKUP_FAILURE_COUNT.load(Ordering::Relaxed),
        }
    }

    pub fn to_prometheus(&self) -> String {
        format!(
            "# HELP http_requests_total Total number of HTTP requests\n\
             # TYPE http_requests_total counter\n\
             http_requests_total {}\n\
             \n\
             # HELP http_errors_total Total number of HTTP responses with status >= 400\n\
             # TYPE http_errors_total counter\n\
             http_errors_total {}\n\
             \n\
             # HELP user_lookup_failures_total Lookups that failed in the data accessor\n\
             # TYPE user_lookup_failures_total counter\n\
             user_lookup_failures_total {}\n",
            self.http_requests_total, self.http_errors_total, self.user_lookup_failures_total
        )
    }
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Prometheus metrics", body = String, content_type = "text/plain")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(MetricsResponse::snapshot().to_prometheus())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prometheus_format() {
        let text = MetricsResponse {
            http_requests_total: 7,
            http_errors_total: 2,
            user_lookup_failures_total: 1,
        }
        .to_prometheus();

        assert!(text.contains("http_requests_total 7\n"));
        assert!(text.contains("http_errors_total 2\n"));
        assert!(text.contains("user_lookup_failures_total 1\n"));
        assert!(text.contains("# TYPE http_requests_total counter"));
    }

    #[test]
    fn test_counters_only_grow() {
        let before = MetricsResponse::snapshot();
        increment_request_count();
        increment_error_count();
        increment_lookup_failure_count();
        let after = MetricsResponse::snapshot();

        assert!(after.http_requests_total > before.http_requests_total);
        assert!(after.http_errors_total > before.http_errors_total);
        assert!(after.user_lookup_failures_total > before.user_lookup_failures_total);
    }
}
