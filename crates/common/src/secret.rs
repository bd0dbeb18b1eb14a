//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports types from the [`secrecy`] crate. The media API secret is the
//! only long-lived secret in this workspace; it is held as a `SecretString`
//! from the moment it is read from the environment until it is handed to the
//! JWT encoder.
//!
//! `SecretString` implements `Debug` with redaction, so any struct deriving
//! `Debug` that contains one is safe to log.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct SigningCredentials {
//!     api_key: String,
//!     api_secret: SecretString,
//! }
//!
//! let creds = SigningCredentials {
//!     api_key: "APIdev123".to_string(),
//!     api_secret: SecretString::from("very-secret"),
//! };
//!
//! // Debug output shows the key id but redacts the secret
//! assert!(!format!("{creds:?}").contains("very-secret"));
//!
//! // Access requires an explicit call
//! let raw: &str = creds.api_secret.expose_secret();
//! assert_eq!(raw, "very-secret");
//! ```

pub use secrecy::{ExposeSecret, SecretString};
