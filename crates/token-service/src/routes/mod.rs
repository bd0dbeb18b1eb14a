//! HTTP routes for the Token Service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use crate::middleware::http_metrics_middleware;
use crate::services::TokenIssuer;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Request bodies above this size are rejected before parsing.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Config,

    /// The issuer behind both token surfaces.
    pub issuer: TokenIssuer,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let issuer = TokenIssuer::from_config(&config);
        Self { config, issuer }
    }
}

/// Build the application routes.
///
/// - `/health`, `/ready`, `/metrics` - operational, unversioned
/// - `POST /api/v1/media/token` - HTTP token surface
/// - `POST /api/rpc/:procedure` - RPC token surface (`media.getToken`)
///
/// Layers, innermost first: request timeout and tracing, body limit,
/// CORS when origins are configured, HTTP metrics (outermost, so framework
/// rejections are counted).
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/api/v1/media/token", post(handlers::handle_media_token))
        .route("/api/rpc/:procedure", post(handlers::handle_rpc))
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    let router = api_routes
        .merge(metrics_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES));

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(middleware::from_fn(http_metrics_middleware))
}

/// CORS for browser clients. `None` when no origins are configured.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
