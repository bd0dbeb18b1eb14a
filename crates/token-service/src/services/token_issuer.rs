//! Media room token issuance.
//!
//! `TokenIssuer` is the one place that validates a token request, checks the
//! issuer's configuration state and signs. The HTTP and RPC handlers are thin
//! adapters over [`TokenIssuer::issue`].

use crate::config::{Config, CredentialsError, MediaCredentials};
use crate::crypto;
use crate::errors::TokenError;
use crate::models::IssuedToken;
use crate::observability::hash_for_correlation;
use chrono::Utc;
use common::jwt::{MediaClaims, VideoGrant, MAX_JWT_SIZE_BYTES, MAX_TOKEN_TTL, MIN_TOKEN_TTL};
use std::time::Duration;
use tracing::instrument;

/// Issues participant tokens for media rooms.
///
/// Holds read-only state only; clone it freely across request handlers.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    credentials: Result<MediaCredentials, CredentialsError>,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer from loaded credentials (or the reason they are
    /// missing) and a token lifetime.
    ///
    /// `ttl` is clamped into `[MIN_TOKEN_TTL, MAX_TOKEN_TTL]` so every token
    /// carries a bounded, non-zero expiry.
    pub fn new(credentials: Result<MediaCredentials, CredentialsError>, ttl: Duration) -> Self {
        if let Err(e) = &credentials {
            tracing::error!(
                target: "ts.token",
                error = %e,
                "Media credentials unavailable; token issuance disabled"
            );
        }

        Self {
            credentials,
            ttl: ttl.clamp(MIN_TOKEN_TTL, MAX_TOKEN_TTL),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.media_credentials.clone(), config.token_ttl)
    }

    /// Whether the issuer can sign tokens.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_ok()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token letting `identity` join `room` with publish and
    /// subscribe rights.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if `room` or `identity` is empty, or so long that
    ///   the signed token would exceed `MAX_JWT_SIZE_BYTES`
    /// - `Misconfigured` if credentials or the endpoint URL are missing
    /// - `SigningFailure` if the signing library rejects the key material
    #[instrument(
        skip_all,
        name = "ts.token.issue",
        fields(room = %hash_for_correlation(room), identity = %hash_for_correlation(identity))
    )]
    pub fn issue(&self, room: &str, identity: &str) -> Result<IssuedToken, TokenError> {
        if room.is_empty() {
            return Err(TokenError::missing_room());
        }
        if identity.is_empty() {
            return Err(TokenError::missing_identity());
        }

        let credentials = self.credentials.as_ref().map_err(|e| {
            tracing::error!(
                target: "ts.token",
                error = %e,
                "Refusing to issue media token: issuer is misconfigured"
            );
            TokenError::Misconfigured(e.clone())
        })?;

        let claims = MediaClaims::new(
            &credentials.api_key,
            identity,
            VideoGrant::participant(room),
            crypto::generate_token_id(),
            Utc::now().timestamp(),
            self.ttl,
        );

        let token = crypto::sign_media_token(&claims, &credentials.api_secret).map_err(|e| {
            tracing::error!(target: "ts.token", error = %e, "Media token signing failed");
            e
        })?;

        // The media service rejects oversized tokens before verifying them
        if token.len() > MAX_JWT_SIZE_BYTES {
            tracing::debug!(
                target: "ts.token",
                token_size = token.len(),
                max_size = MAX_JWT_SIZE_BYTES,
                "Refusing to issue media token: encoded token too large"
            );
            return Err(TokenError::fields_too_long());
        }

        tracing::debug!(
            target: "ts.token",
            expires_at = claims.exp,
            "Media token issued"
        );

        Ok(IssuedToken {
            token,
            url: credentials.server_url.clone(),
        })
    }
}
