//! Observability module for the Token Service.
//!
//! # Privacy by Default
//!
//! Instrumentation uses `#[instrument(skip_all)]` with explicit fields.
//! - **SAFE**: surface, status, error category, procedure name
//! - **HASHED**: room and identity (caller-supplied, may be personal data or
//!   an encoded configuration blob)
//! - **NEVER**: API secret, issued tokens

pub mod metrics;

use crate::errors::TokenError;
use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars).
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex::encode(result.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller-side validation failures
    Validation,
    /// Missing or unusable deployment configuration
    Configuration,
    /// Signing failures
    Cryptographic,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Cryptographic => "cryptographic",
        }
    }
}

impl From<&TokenError> for ErrorCategory {
    fn from(err: &TokenError) -> Self {
        match err {
            TokenError::InvalidRequest(_) => ErrorCategory::Validation,
            TokenError::Misconfigured(_) => ErrorCategory::Configuration,
            TokenError::SigningFailure(_) => ErrorCategory::Cryptographic,
        }
    }
}
