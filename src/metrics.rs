//! Prometheus metrics.
//!
//! HTTP traffic is recorded by [`metrics_middleware`]; lending activity by the
//! `track_*` helpers called from the services. Everything is a no-op when
//! `OBSERVABILITY_ENABLED` is `false` or `0`.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use gearlend_auth::Role;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Initialize Prometheus metrics exporter with upkeep task.
/// Returns None if observability is disabled or the recorder cannot be installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let builder = match PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        &[
            0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
        ],
    ) {
        Ok(builder) => builder,
        Err(e) => {
            tracing::warn!(error = %e, "invalid metric buckets, metrics disabled");
            return None;
        }
    };

    let handle = match builder.install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::warn!(error = %e, "failed to install Prometheus recorder, metrics disabled");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let uri_path = req.uri().path().to_owned();

    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or(uri_path);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router exposing `/metrics`
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_loan_granted(quantity: i64) {
    if !is_observability_enabled() {
        return;
    }
    counter!("loans_granted_total").increment(1);
    counter!("loaned_units_total").increment(quantity.max(0) as u64);
}

pub fn track_loan_denied(reason: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("loans_denied_total", "reason" => reason).increment(1);
}

pub fn track_loans_returned(count: usize) {
    if !is_observability_enabled() || count == 0 {
        return;
    }
    counter!("loans_returned_total").increment(count as u64);
}

pub fn track_login_success(role: Role) {
    if !is_observability_enabled() {
        return;
    }
    counter!("logins_total", "role" => role.as_str(), "status" => "success").increment(1);
}

pub fn track_login_failure(role: Role) {
    if !is_observability_enabled() {
        return;
    }
    counter!("logins_total", "role" => role.as_str(), "status" => "failure").increment(1);
}

pub fn track_item_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("items_created_total").increment(1);
}
