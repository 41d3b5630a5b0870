//! Failure -> HTTP translation.
//!
//! Every handler returns `Result<_, ApiError>`, so all failures leave through
//! the same `IntoResponse` impl and share one body shape.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use catalog_core::{DomainError, Violations};

use crate::app::dto::{ErrorBody, ValidationErrorBody};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(Violations),

    /// Malformed request (unreadable body, non-numeric id, ...).
    #[error("{0}")]
    BadRequest(String),

    /// The detail is logged, never sent.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => Self::NotFound(err.to_string()),
            DomainError::Validation(violations) => Self::Validation(violations),
            DomainError::InvalidId(msg) => Self::BadRequest(msg),
            DomainError::Unexpected(detail) => Self::Internal(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(errors) => {
                let body = ValidationErrorBody {
                    status: status.as_u16(),
                    timestamp: timestamp(),
                    errors,
                };
                return (status, Json(body)).into_response();
            }
            Self::Internal(detail) => {
                tracing::error!(detail = %detail, "request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            Self::NotFound(message) | Self::BadRequest(message) => message,
        };

        let body = ErrorBody {
            status: status.as_u16(),
            timestamp: timestamp(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
