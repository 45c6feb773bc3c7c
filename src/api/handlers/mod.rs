//! API handlers

pub mod health;
pub mod tasks;

use axum::{http::StatusCode, response::Response};

use super::response::error_response;

/// Fallback for paths no route matches
pub async fn route_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

/// Fallback for a known path with an unsupported method
///
/// Answers 404 rather than 405; existing clients only check the body.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::NOT_FOUND, "Method not allowed")
}
