use crate::errors::TokenError;
use crate::models::{IssuedToken, TokenRequest};
use crate::observability::metrics::{record_error, record_token_issuance};
use crate::observability::ErrorCategory;
use crate::routes::AppState;
use crate::services::TokenIssuer;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use std::time::Instant;

/// Issue a token through `issuer` and record the outcome under `surface`.
///
/// Shared by the HTTP and RPC adapters so both report identical metrics.
pub(crate) fn issue_with_metrics(
    issuer: &TokenIssuer,
    surface: &'static str,
    request: &TokenRequest,
) -> Result<IssuedToken, TokenError> {
    let start = Instant::now();
    let result = issuer.issue(request.room(), request.identity());
    let duration = start.elapsed();

    match &result {
        Ok(_) => record_token_issuance(surface, "success", duration),
        Err(e) => {
            record_token_issuance(surface, "error", duration);
            record_error(
                "issue_token",
                ErrorCategory::from(e).as_str(),
                e.status_code().as_u16(),
            );
        }
    }

    result
}

/// Turn a JSON extractor rejection into the error the caller receives.
///
/// The metric carries the status actually sent (400), not the extractor's
/// own 413/415/422.
pub(crate) fn reject_malformed_body(rejection: &JsonRejection) -> TokenError {
    tracing::debug!(target: "ts.http", error = %rejection, "Rejected token request body");
    let err = TokenError::malformed_body();
    record_error(
        "issue_token",
        ErrorCategory::from(&err).as_str(),
        err.status_code().as_u16(),
    );
    err
}

/// Handle media token request
///
/// POST /api/v1/media/token
///
/// Any body the JSON extractor rejects (wrong content type, unparsable JSON,
/// oversize) is reported as a malformed request in the service's own error
/// format.
#[tracing::instrument(skip_all, name = "ts.http.media_token")]
pub async fn handle_media_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<IssuedToken>, TokenError> {
    let Json(request) = payload.map_err(|rejection| reject_malformed_body(&rejection))?;

    let issued = issue_with_metrics(&state.issuer, "http", &request)?;
    Ok(Json(issued))
}
