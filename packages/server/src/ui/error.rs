//! API error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors returned to HTTP callers as `{ "error": "<message>" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("WhatsApp client not ready")]
    NotReady,

    #[error("QR code not available yet")]
    QrUnavailable,

    #[error("Failed to fetch chats")]
    ChatsFailed,

    #[error("Failed to fetch unanswered messages")]
    UnansweredFailed,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotReady => StatusCode::BAD_REQUEST,
            ApiError::QrUnavailable => StatusCode::NOT_FOUND,
            ApiError::ChatsFailed | ApiError::UnansweredFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
