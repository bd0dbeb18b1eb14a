//! Request and response types for the Token Service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of a token request on either surface.
///
/// Fields are optional at the wire level so that an absent field is reported
/// by the issuer as a validation failure rather than as a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub room: Option<String>,

    /// Participant identity; named `username` on the wire.
    #[serde(default)]
    pub username: Option<String>,
}

impl TokenRequest {
    pub fn room(&self) -> &str {
        self.room.as_deref().unwrap_or_default()
    }

    pub fn identity(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
}

/// A signed media token plus the endpoint it is valid against.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Signed bearer token.
    pub token: String,

    /// Media endpoint URL, unchanged from configuration.
    pub url: String,
}

/// Custom Debug implementation that redacts the bearer token.
impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[REDACTED]")
            .field("url", &self.url)
            .finish()
    }
}

/// Readiness probe response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub credentials: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
