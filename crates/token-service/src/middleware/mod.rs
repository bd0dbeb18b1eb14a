//! Middleware for the Token Service.
//!
//! - `http_metrics` - records method, normalized path, status and latency
//!   for every response

pub mod http_metrics;

pub use http_metrics::http_metrics_middleware;
