// src/server/error.rs
// =============================================================================
// Maps explorer errors onto HTTP responses with a small JSON body:
//   { "error": "<message>" }
// =============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::ExplorerError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError(pub ExplorerError);

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ExplorerError::Remote { .. } => StatusCode::BAD_GATEWAY,
            ExplorerError::NotConnected => StatusCode::CONFLICT,
            ExplorerError::InvalidUtf8 { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ExplorerError::InvalidEndpoint { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        } else {
            tracing::warn!("request rejected: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
