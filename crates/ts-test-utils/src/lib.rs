//! # Token Service Test Utilities
//!
//! Shared test utilities for the Token Service.
//!
//! This crate provides:
//! - Fixed media credentials and config builders (`fixtures`)
//! - Server test harness (`TestTokenServer` for E2E tests)
//! - Custom assertions (`MediaTokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ts_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestTokenServer::spawn_with_test_credentials().await?;
//!
//!     let body: serde_json::Value = reqwest::Client::new()
//!         .post(format!("{}/api/v1/media/token", server.url()))
//!         .json(&serde_json::json!({"room": "room1", "username": "alice"}))
//!         .send()
//!         .await?
//!         .json()
//!         .await?;
//!
//!     body["token"]
//!         .as_str()
//!         .unwrap()
//!         .to_string()
//!         .assert_valid_media_token()
//!         .assert_grants_room("room1")
//!         .assert_for_identity("alice");
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod server_harness;

pub use assertions::*;
pub use fixtures::*;
pub use server_harness::*;
