use crate::config::CredentialsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned to callers when the issuer has no usable credentials.
///
/// Deliberately identical for every missing variable.
pub const MISCONFIGURED_MESSAGE: &str = "Token issuance is temporarily unavailable";

/// Message returned to callers for unexpected internal failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, Error)]
pub enum TokenError {
    /// The caller omitted or emptied a required field.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The deployment is missing signing credentials or the endpoint URL.
    #[error("Token issuer misconfigured: {0}")]
    Misconfigured(CredentialsError),

    /// The signing library rejected the key material or claims.
    #[error("Token signing failed: {0}")]
    SigningFailure(String),
}

impl TokenError {
    pub fn missing_room() -> Self {
        TokenError::InvalidRequest("missing room".to_string())
    }

    pub fn missing_identity() -> Self {
        TokenError::InvalidRequest("missing identity".to_string())
    }

    pub fn fields_too_long() -> Self {
        TokenError::InvalidRequest("room or identity too long".to_string())
    }

    pub fn malformed_body() -> Self {
        TokenError::InvalidRequest("malformed request body".to_string())
    }

    /// HTTP status for this error: 4xx for caller mistakes, 5xx otherwise.
    pub fn status_code(&self) -> StatusCode {
        match self {
            TokenError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            TokenError::Misconfigured(_) | TokenError::SigningFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show the caller.
    pub fn public_message(&self) -> String {
        match self {
            TokenError::InvalidRequest(reason) => reason.clone(),
            TokenError::Misconfigured(_) => MISCONFIGURED_MESSAGE.to_string(),
            TokenError::SigningFailure(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let code = match &self {
            TokenError::InvalidRequest(_) => "INVALID_REQUEST",
            TokenError::Misconfigured(_) => "SERVICE_MISCONFIGURED",
            TokenError::SigningFailure(_) => "INTERNAL_ERROR",
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code,
                message: self.public_message(),
            },
        };

        (self.status_code(), Json(error_response)).into_response()
    }
}
