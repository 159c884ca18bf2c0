use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::operation::OperationError;

/// Errors surfaced by the HTTP layer
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

/// Server-side failure details are hidden from clients when RUN_MODE is production
fn masks_server_errors() -> bool {
    matches!(
        std::env::var("RUN_MODE").as_deref(),
        Ok("production") | Ok("prod")
    )
}

impl AppError {
    /// HTTP status and stable error code
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Operation(OperationError::InvalidRequest(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
            }
            Self::Operation(OperationError::EntityNotFound(_)) => {
                (StatusCode::BAD_REQUEST, "ENTITY_NOT_FOUND")
            }
            Self::Operation(OperationError::ClientMismatch) => {
                (StatusCode::BAD_REQUEST, "CLIENT_MISMATCH")
            }
            Self::Operation(OperationError::EmptyTemplateField(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "EMPTY_TEMPLATE_FIELD")
            }
            Self::InvalidBody(rejection) => (rejection.status(), "INVALID_BODY"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Operation(e) => e.to_string(),
            Self::InvalidBody(rejection) => rejection.body_text(),
            Self::NotFound(msg) | Self::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(code = code, status = status.as_u16(), message = %detail, "API error");
        } else {
            tracing::warn!(code = code, status = status.as_u16(), message = %detail, "API error");
        }

        let message = if status.is_server_error() && masks_server_errors() {
            "Internal server error".to_string()
        } else {
            detail
        };

        let body = ErrorEnvelope {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
