//! HTTP error envelope.
//!
//! Every failure is rendered as
//! `{"error": {"kind": "<kind>", "message": "<text>"}}`.
//! Unhandled faults keep their details in the log and answer with a generic
//! message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use insyd_core::{ErrorKind, ServiceError};
use log::error;
use serde::Serialize;

const INTERNAL_MESSAGE: &str = "internal server error";

/// Error returned by request handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'static str,
    message: &'a str,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            message: message.into(),
        }
    }

    /// Logs `detail` and returns a masked unhandled error.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!("event=request module=http status=error error_kind=unhandled error={detail}");
        Self {
            kind: ErrorKind::Unhandled,
            message: INTERNAL_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unhandled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value.kind() {
            ErrorKind::Unhandled => Self::internal(value),
            kind => Self {
                kind,
                message: value.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::validation(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope {
            error: ErrorBody {
                kind: self.kind.as_str(),
                message: &self.message,
            },
        };
        (self.status(), Json(envelope)).into_response()
    }
}
