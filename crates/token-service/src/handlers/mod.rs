//! HTTP request handlers for the Token Service.

pub mod health;
pub mod metrics;
pub mod rpc_handler;
pub mod token_handler;

pub use health::{health_check, readiness_check};
pub use metrics::metrics_handler;
pub use rpc_handler::handle_rpc;
pub use token_handler::handle_media_token;
