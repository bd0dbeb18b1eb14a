//! Typed RPC surface.
//!
//! Procedures are addressed by name at `POST /api/rpc/:procedure` and answer
//! in a `{ result: { data } }` / `{ error: { code, message } }` envelope.

use crate::errors::TokenError;
use crate::handlers::token_handler::{issue_with_metrics, reject_malformed_body};
use crate::models::{IssuedToken, TokenRequest};
use crate::routes::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Procedure name for media token issuance.
pub const GET_TOKEN_PROCEDURE: &str = "media.getToken";

#[derive(Debug, Serialize)]
pub struct RpcResponse<T> {
    pub result: RpcResult<T>,
}

#[derive(Debug, Serialize)]
pub struct RpcResult<T> {
    pub data: T,
}

impl<T> RpcResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            result: RpcResult { data },
        }
    }
}

/// Errors in the RPC envelope.
#[derive(Debug)]
pub enum RpcError {
    BadRequest(String),
    NotFound(String),
    Internal,
}

impl RpcError {
    fn code(&self) -> &'static str {
        match self {
            RpcError::BadRequest(_) => "BAD_REQUEST",
            RpcError::NotFound(_) => "NOT_FOUND",
            RpcError::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            RpcError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::NotFound(_) => StatusCode::NOT_FOUND,
            RpcError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenError> for RpcError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidRequest(reason) => RpcError::BadRequest(reason),
            TokenError::Misconfigured(_) | TokenError::SigningFailure(_) => RpcError::Internal,
        }
    }
}

#[derive(Serialize)]
struct RpcErrorBody {
    error: RpcErrorDetail,
}

#[derive(Serialize)]
struct RpcErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = match self {
            RpcError::BadRequest(message) => message,
            RpcError::NotFound(procedure) => format!("No procedure named '{procedure}'"),
            RpcError::Internal => crate::errors::INTERNAL_ERROR_MESSAGE.to_string(),
        };

        (
            status,
            Json(RpcErrorBody {
                error: RpcErrorDetail { code, message },
            }),
        )
            .into_response()
    }
}

/// Dispatch an RPC call.
///
/// POST /api/rpc/:procedure
#[tracing::instrument(skip_all, name = "ts.rpc.call", fields(procedure = tracing::field::Empty))]
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Path(procedure): Path<String>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<RpcResponse<IssuedToken>>, RpcError> {
    tracing::Span::current().record("procedure", procedure.as_str());

    if procedure != GET_TOKEN_PROCEDURE {
        tracing::debug!(target: "ts.rpc", "Unknown procedure requested");
        return Err(RpcError::NotFound(procedure));
    }

    let Json(request) =
        payload.map_err(|rejection| RpcError::from(reject_malformed_body(&rejection)))?;

    let issued = issue_with_metrics(&state.issuer, "rpc", &request)?;
    Ok(Json(RpcResponse::new(issued)))
}
