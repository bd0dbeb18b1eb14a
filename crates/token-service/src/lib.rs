//! Token Service Library
//!
//! Issues short-lived, signed participant tokens for a real-time media
//! service, over a plain HTTP endpoint and a typed RPC procedure.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Token signing
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - HTTP middleware
//! - `models` - Request and response types
//! - `observability` - Metrics and log field hashing
//! - `routes` - Router and application state
//! - `services` - Business logic layer

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
