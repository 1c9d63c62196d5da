use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wayfare_core::{BackendError, CoreError};

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    UpstreamError(String),
    /// Body could not be read as a search plan; keeps the extractor's status.
    RejectedRequest(StatusCode, String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UpstreamError(msg) => {
                tracing::error!("Upstream Error: {}", msg);
                (StatusCode::BAD_GATEWAY, format!("Search failed: {}", msg))
            }
            AppError::RejectedRequest(status, msg) => {
                tracing::warn!("Rejected JSON body: {}", msg);
                (status, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => Self::ValidationError(msg),
        }
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        Self::UpstreamError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::RejectedRequest(rejection.status(), rejection.body_text())
    }
}
