use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by announcement operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Authentication required")]
    AuthenticationMissing,
    #[error("Invalid teacher credentials")]
    AuthenticationInvalid,
    #[error("{0}")]
    ValidationFailed(String),
    #[error("Invalid id")]
    IdentifierMalformed,
    #[error("Announcement not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::ValidationFailed(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::AuthenticationMissing | ServiceError::AuthenticationInvalid => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::ValidationFailed(_) | ServiceError::IdentifierMalformed => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed or mistyped request bodies are validation failures.
impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::ValidationFailed(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ServiceError::StoreUnavailable(e) => {
                tracing::error!("store error: {e:?}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
