//! Media access-token utilities shared between the issuer and its consumers.
//!
//! This module provides:
//! - The claim layout of a media room access token (`MediaClaims`, `VideoGrant`)
//! - Size limits and lifetime bounds
//! - Key ID extraction from JWT headers
//! - Full verification as performed by the media service on join
//!
//! # Token format
//!
//! Tokens are HS256 JWS compact strings in the access-token layout used by
//! real-time media servers (LiveKit-compatible):
//!
//! ```text
//! header:  { "alg": "HS256", "typ": "JWT", "kid": "<api key>" }
//! payload: { "iss": "<api key>", "sub": "<identity>", "name": "<identity>",
//!            "iat": ..., "nbf": ..., "exp": ..., "jti": "<uuid>",
//!            "video": { "roomJoin": true, "room": "<room>",
//!                       "canPublish": true, "canSubscribe": true } }
//! ```
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing
//! - Only HS256 is accepted on verification
//! - Error messages are generic; detail is logged at debug level
//! - `sub`, `name` and `jti` are redacted in `Debug` output

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// Checked before base64 decoding and signature verification.
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

/// Default clock skew tolerance applied to `exp` and `nbf` on verification.
pub const DEFAULT_CLOCK_SKEW: Duration = Duration::from_secs(300);

/// Default token lifetime (6 hours), matching the media SDK's default policy.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Shortest lifetime an operator may configure.
pub const MIN_TOKEN_TTL: Duration = Duration::from_secs(60);

/// Longest lifetime an operator may configure (24 hours).
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Signing algorithm for media access tokens.
pub const MEDIA_TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during media token validation.
///
/// All variants share one message so callers cannot distinguish failure causes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token size exceeds maximum allowed.
    #[error("The access token is invalid or expired")]
    TokenTooLarge,

    /// Token format is invalid (not a valid JWT structure).
    #[error("The access token is invalid or expired")]
    MalformedToken,

    /// Token is missing required `kid` header.
    #[error("The access token is invalid or expired")]
    MissingKid,

    /// Signature, issuer, expiry or not-before check failed.
    #[error("The access token is invalid or expired")]
    Rejected,
}

// =============================================================================
// Claims Types
// =============================================================================

/// Room permissions carried in the `video` claim.
///
/// The issuer only ever builds this through [`VideoGrant::participant`]: join
/// plus publish plus subscribe on one room. There are no fields for room
/// administration, recording or other moderator capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    /// Permission to join the room named in `room`.
    pub room_join: bool,

    /// The single room this grant is scoped to.
    pub room: String,

    /// Permission to publish tracks.
    pub can_publish: bool,

    /// Permission to subscribe to other participants' tracks.
    pub can_subscribe: bool,
}

impl VideoGrant {
    /// Participant grant for `room`: join, publish and subscribe enabled.
    #[must_use]
    pub fn participant(room: &str) -> Self {
        Self {
            room_join: true,
            room: room.to_string(),
            can_publish: true,
            can_subscribe: true,
        }
    }
}

/// Media access-token claims.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaClaims {
    /// Issuer: the API key id the media service uses to find the secret.
    pub iss: String,

    /// Subject: participant identity. Redacted in Debug output.
    pub sub: String,

    /// Display name shown to other participants. Redacted in Debug output.
    pub name: String,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Not-before timestamp (Unix epoch seconds).
    pub nbf: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Unique token id. Redacted in Debug output.
    pub jti: String,

    /// Room grant.
    pub video: VideoGrant,
}

impl fmt::Debug for MediaClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaClaims")
            .field("iss", &self.iss)
            .field("sub", &"[REDACTED]")
            .field("name", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("nbf", &self.nbf)
            .field("exp", &self.exp)
            .field("jti", &"[REDACTED]")
            .field("video", &self.video)
            .finish()
    }
}

impl MediaClaims {
    /// Build claims for `identity` issued at `issued_at` and valid for `ttl`.
    ///
    /// `identity` becomes both `sub` and `name`. `nbf` equals `iat`.
    #[must_use]
    pub fn new(
        key_id: &str,
        identity: &str,
        video: VideoGrant,
        jti: String,
        issued_at: i64,
        ttl: Duration,
    ) -> Self {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            iss: key_id.to_string(),
            sub: identity.to_string(),
            name: identity.to_string(),
            iat: issued_at,
            nbf: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
            jti,
            video,
        }
    }

    /// Seconds between issuance and expiry.
    #[must_use]
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp.saturating_sub(self.iat)
    }
}

// =============================================================================
// Functions
// =============================================================================

/// Extract the `kid` (API key id) from a JWT header without verifying the signature.
///
/// # Security
///
/// - Token size is checked before any parsing
/// - This function does NOT validate the token
///
/// # Errors
///
/// - `TokenTooLarge` - Token exceeds `MAX_JWT_SIZE_BYTES`
/// - `MalformedToken` - Wrong structure, bad base64 or invalid JSON
/// - `MissingKid` - Header has no non-empty string `kid`
pub fn extract_kid(token: &str) -> Result<String, JwtValidationError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }

    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        tracing::debug!(
            target: "common.jwt",
            parts = parts.len(),
            "Token rejected: invalid JWT format"
        );
        return Err(JwtValidationError::MalformedToken);
    }

    let header_part = parts.first().ok_or(JwtValidationError::MalformedToken)?;
    let header_bytes = URL_SAFE_NO_PAD.decode(header_part).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode JWT header base64");
        JwtValidationError::MalformedToken
    })?;

    let header: serde_json::Value = serde_json::from_slice(&header_bytes).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to parse JWT header JSON");
        JwtValidationError::MalformedToken
    })?;

    header
        .get("kid")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .ok_or(JwtValidationError::MissingKid)
}

/// Verify a media access token the way the media service does on join.
///
/// Validates:
/// - Token size (must be <= `MAX_JWT_SIZE_BYTES`)
/// - HS256 signature against `api_secret`
/// - `iss` equals `api_key`
/// - `exp` and `nbf`, each with `leeway` tolerance
///
/// # Errors
///
/// Returns `TokenTooLarge` for oversized input and `Rejected` for every
/// other failure.
pub fn verify_media_token(
    token: &str,
    api_key: &str,
    api_secret: &str,
    leeway: Duration,
) -> Result<MediaClaims, JwtValidationError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }

    let mut validation = Validation::new(MEDIA_TOKEN_ALGORITHM);
    validation.leeway = leeway.as_secs();
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.set_issuer(&[api_key]);
    validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);

    let decoding_key = DecodingKey::from_secret(api_secret.as_bytes());

    let token_data = decode::<MediaClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Media token verification failed");
        JwtValidationError::Rejected
    })?;

    Ok(token_data.claims)
}

// =============================================================================
// Tests
// =============================================================================
