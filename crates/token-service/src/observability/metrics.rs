//! Metrics definitions for the Token Service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `ts_` prefix for Token Service
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `surface`: 2 values (http, rpc)
//! - `status`: success / error (plus timeout for HTTP)
//! - `error_category`: 3 values (validation, configuration, cryptographic)
//! - `endpoint`: known paths, `/api/rpc/{procedure}` or `/other`

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("ts_http_request".to_string()),
            &[
                0.001, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        // Signing is CPU-only; sub-millisecond resolution matters here
        .set_buckets_for_metric(
            Matcher::Prefix("ts_token_issuance".to_string()),
            &[0.0001, 0.0005, 0.001, 0.002, 0.005, 0.010, 0.025, 0.050],
        )
        .map_err(|e| format!("Failed to set token issuance buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// Token Metrics
// ============================================================================

/// Record token issuance duration and outcome
///
/// Metric: `ts_token_issuance_duration_seconds`, `ts_token_issuance_total`
/// Labels: `surface`, `status`
pub fn record_token_issuance(surface: &str, status: &str, duration: Duration) {
    histogram!("ts_token_issuance_duration_seconds",
        "surface" => surface.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("ts_token_issuance_total",
        "surface" => surface.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

// ============================================================================
// Error Metrics
// ============================================================================

/// Record error by category
///
/// Metric: `ts_errors_total`
/// Labels: `operation`, `error_category`, `status_code`
pub fn record_error(operation: &str, error_category: &str, status_code: u16) {
    counter!("ts_errors_total",
        "operation" => operation.to_string(),
        "error_category" => error_category.to_string(),
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `ts_http_requests_total`, `ts_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status` / `status_code`
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);
    let status = categorize_status_code(status_code);

    histogram!("ts_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.clone(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("ts_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Normalize endpoint path to prevent label cardinality explosion
fn normalize_endpoint(path: &str) -> String {
    match path {
        "/health" | "/ready" | "/metrics" | "/api/v1/media/token" => path.to_string(),
        _ => normalize_dynamic_endpoint(path),
    }
}

/// RPC procedure names are caller-chosen, so they collapse to one label.
fn normalize_dynamic_endpoint(path: &str) -> String {
    if let Some(procedure) = path.strip_prefix("/api/rpc/") {
        if !procedure.is_empty() && !procedure.contains('/') {
            return "/api/rpc/{procedure}".to_string();
        }
    }

    "/other".to_string()
}
