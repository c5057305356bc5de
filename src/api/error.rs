//! HTTP error payloads and mapping from application errors.
//!
//! Every failure is a single-line `message`; internal failures also carry
//! the raw detail in `error` for diagnostics.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::application::{AppError, ErrorKind};

/// Error envelope returned by every handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(skip)]
    status: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiError {
    /// A 400 response for a malformed or incomplete request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST.as_u16(),
            message: message.into(),
            error: None,
        }
    }

    /// Map an application failure. `context` replaces the message for
    /// internal failures, whose detail moves to `error`.
    ///
    /// A duplicate email answers 500 rather than 409 to stay compatible
    /// with existing clients.
    pub fn from_app(err: AppError, context: &str) -> Self {
        let status = match err.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::Conflict | ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match err.kind() {
            ErrorKind::Validation | ErrorKind::Auth | ErrorKind::Conflict => Self {
                status: status.as_u16(),
                message: err.to_string(),
                error: None,
            },
            ErrorKind::Store => {
                error!(error = %err, "{}", context);
                Self {
                    status: status.as_u16(),
                    message: context.to_string(),
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
