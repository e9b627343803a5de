//! Application error type mapping to HTTP status codes and JSON bodies.
//!
//! Only the non-streaming path can fail this way: once an event stream is
//! open, failures travel as `error` events instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use groundchat_types::error::RequestError;
use groundchat_types::llm::LlmError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be decoded.
    Request(RequestError),
    /// The inference capability produced no reply.
    Inference(LlmError),
    /// Generic internal error.
    Internal(String),
}

impl From<RequestError> for AppError {
    fn from(e: RequestError) -> Self {
        AppError::Request(e)
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Inference(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, summary, detail) = match &self {
            AppError::Request(e) => (
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                "Invalid request body",
                e.to_string(),
            ),
            AppError::Inference(e) => (
                StatusCode::BAD_GATEWAY,
                "INFERENCE_ERROR",
                "Failed to process request",
                e.to_string(),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
                msg.clone(),
            ),
        };

        if status.is_server_error() {
            tracing::error!(code, detail = %detail, "request failed");
        } else {
            tracing::debug!(code, detail = %detail, "request rejected");
        }

        let body = json!({
            "error": summary,
            "code": code,
            "detail": detail,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
