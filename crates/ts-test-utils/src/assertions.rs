//! Custom test assertions for media tokens
//!
//! Assertions verify the signature against the fixed test credentials first,
//! so a passing chain means the media service would accept the token.

use crate::fixtures::{TEST_API_KEY, TEST_API_SECRET};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use common::jwt::{extract_kid, verify_media_token, MediaClaims, DEFAULT_CLOCK_SKEW};

/// Custom assertions for issued media tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_media_token()
///     .assert_grants_room("studio-42")
///     .assert_for_identity("maria")
///     .assert_expires_in(21_600);
/// ```
pub trait MediaTokenAssertions {
    /// Assert the token verifies against the test key id and secret
    fn assert_valid_media_token(&self) -> &Self;

    /// Assert the grant set is exactly join/publish/subscribe on `room`
    fn assert_grants_room(&self, room: &str) -> &Self;

    /// Assert subject and display name are `identity`
    fn assert_for_identity(&self, identity: &str) -> &Self;

    /// Assert the token lives exactly `seconds` after issuance
    fn assert_expires_in(&self, seconds: i64) -> &Self;

    /// Decode the claims without checking the signature
    fn decode_claims_unverified(&self) -> serde_json::Value;
}

fn verified_claims(token: &str) -> MediaClaims {
    match verify_media_token(token, TEST_API_KEY, TEST_API_SECRET, DEFAULT_CLOCK_SKEW) {
        Ok(claims) => claims,
        Err(e) => panic!("Token failed verification against test credentials: {e}"),
    }
}

impl MediaTokenAssertions for String {
    fn assert_valid_media_token(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let kid = extract_kid(self).expect("token header should carry a kid");
        assert_eq!(kid, TEST_API_KEY, "kid should be the configured API key");

        let claims = verified_claims(self);
        assert!(
            claims.exp > claims.iat,
            "exp ({}) must be after iat ({})",
            claims.exp,
            claims.iat
        );
        assert!(claims.nbf <= claims.iat, "token must be usable immediately");
        assert!(!claims.jti.is_empty(), "token must carry a jti");

        self
    }

    fn assert_grants_room(&self, room: &str) -> &Self {
        let video = verified_claims(self).video;
        assert!(video.room_join, "token must grant room join");
        assert!(video.can_publish, "token must grant publish");
        assert!(video.can_subscribe, "token must grant subscribe");
        assert_eq!(video.room, room, "token must be scoped to the requested room");

        let raw = self.decode_claims_unverified();
        let grant_keys = raw["video"]
            .as_object()
            .expect("video grant should be an object")
            .len();
        assert_eq!(grant_keys, 4, "video grant must carry no extra permissions");

        self
    }

    fn assert_for_identity(&self, identity: &str) -> &Self {
        let claims = verified_claims(self);
        assert_eq!(claims.sub, identity, "subject must be the identity");
        assert_eq!(claims.name, identity, "name must be the identity");
        self
    }

    fn assert_expires_in(&self, seconds: i64) -> &Self {
        let claims = verified_claims(self);
        assert_eq!(
            claims.exp - claims.iat,
            seconds,
            "token lifetime should be {seconds}s"
        );

        let now = chrono::Utc::now().timestamp();
        assert!(claims.exp > now, "token must not already be expired");
        self
    }

    fn decode_claims_unverified(&self) -> serde_json::Value {
        let payload = self
            .split('.')
            .nth(1)
            .expect("JWT should have a payload segment");
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .expect("payload should be base64url");
        serde_json::from_slice(&bytes).expect("payload should be JSON")
    }
}
