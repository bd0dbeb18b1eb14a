use crate::errors::TokenError;
use common::jwt::{MediaClaims, MEDIA_TOKEN_ALGORITHM};
use common::secret::{ExposeSecret, SecretString};
use jsonwebtoken::{encode, EncodingKey, Header};
use tracing::instrument;

/// Sign media token claims with the API secret (HS256).
///
/// The header carries `typ = "JWT"` and `kid = claims.iss` so consumers can
/// select the secret before verifying.
#[instrument(skip_all)]
pub fn sign_media_token(
    claims: &MediaClaims,
    api_secret: &SecretString,
) -> Result<String, TokenError> {
    let secret = api_secret.expose_secret();
    if secret.is_empty() {
        return Err(TokenError::SigningFailure("Empty signing secret".to_string()));
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    let mut header = Header::new(MEDIA_TOKEN_ALGORITHM);
    header.typ = Some("JWT".to_string());
    header.kid = Some(claims.iss.clone());

    encode(&header, claims, &encoding_key)
        .map_err(|e| TokenError::SigningFailure(format!("JWT signing operation failed: {}", e)))
}

/// Fresh random token id for the `jti` claim.
pub fn generate_token_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
