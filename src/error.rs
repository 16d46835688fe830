// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
///
/// Completion-provider failures never reach the client through this type:
/// the agent service converts them into fallback echo responses. Google
/// API failures on the data endpoints are surfaced with details, since
/// there is no meaningful fallback for "your calendar".
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Google API error: {0}")]
    GoogleApi(String),

    #[error("Token exchange failed: {0}")]
    AuthExchange(String),

    #[error("Completion provider error: {0}")]
    Completion(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::GoogleApi(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "google_api_error",
                Some(msg.clone()),
            ),
            // The OAuth callback redirects on exchange failure instead of
            // returning this; kept as a mapping for any other caller.
            AppError::AuthExchange(msg) => {
                (StatusCode::BAD_GATEWAY, "auth_exchange_failed", Some(msg.clone()))
            }
            AppError::Completion(msg) => {
                tracing::error!(error = %msg, "Completion provider error");
                (StatusCode::BAD_GATEWAY, "completion_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bad_request_maps_to_400() {
        let response = AppError::BadRequest("Prompt is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_google_api_error_maps_to_500() {
        let response = AppError::GoogleApi("HTTP 401: bad token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
