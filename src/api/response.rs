//! JSON error bodies and the `TaskError` → HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::TaskError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn error_response(status: StatusCode, msg: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

impl TaskError {
    fn status_code(&self) -> StatusCode {
        match self {
            TaskError::Validation(_) | TaskError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            TaskError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            return error_response(self.status_code(), &self.to_string());
        }

        // Internal details stay in the log
        error!(error = %self, "request failed");
        error_response(self.status_code(), "Internal server error")
    }
}
