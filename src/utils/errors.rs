//! Error handling
//!
//! Every fallible operation in the crate returns `AppResult<T>`. The error
//! carries a kind (see [`ErrorKind`]) plus a human readable message, and is
//! converted into a JSON response at the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation {
        field: Option<&'static str>,
        message: String,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),
}

/// Discriminant of an [`AppError`], for callers that branch on the failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    InvalidState,
    NotFound,
    Conflict,
    Forbidden,
    Unauthorized,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::Validation,
            AppError::InvalidState(_) => ErrorKind::InvalidState,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Forbidden(_) => ErrorKind::Forbidden,
            AppError::Unauthorized(_) | AppError::Jwt(_) => ErrorKind::Unauthorized,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The bare message, without the kind prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. } => message,
            AppError::InvalidState(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Forbidden(msg)
            | AppError::Unauthorized(msg)
            | AppError::Internal(msg)
            | AppError::Jwt(msg) => msg,
        }
    }

    /// Offending field of a validation error
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AppError::Validation { field, .. } => *field,
            _ => None,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidState | ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Jwt(_) => "JWT_ERROR",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "Validation Error",
            AppError::InvalidState(_) => "Invalid State",
            AppError::NotFound(_) => "Not Found",
            AppError::Conflict(_) => "Conflict",
            AppError::Forbidden(_) => "Forbidden",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) => "Internal Server Error",
            AppError::Jwt(_) => "JWT Error",
        }
    }
}

/// Error body returned by the API
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    kind: ErrorKind,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("❌ {}", self);
        } else {
            log::warn!("⚠️ {}", self);
        }

        let body = ErrorResponse {
            error: self.title().to_string(),
            message: self.message().to_string(),
            kind: self.kind(),
            code: self.code().to_string(),
            field: self.field(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors.field_errors().keys().next().copied();
        AppError::Validation {
            field,
            message: errors.to_string(),
        }
    }
}

/// Typed result for operations that can fail
pub type AppResult<T> = Result<T, AppError>;

/// Helper for field validation errors
pub fn validation_error(field: &'static str, message: impl Into<String>) -> AppError {
    AppError::Validation {
        field: Some(field),
        message: message.into(),
    }
}

/// Helper for not-found errors
pub fn not_found_error(message: impl Into<String>) -> AppError {
    AppError::NotFound(message.into())
}

/// Helper for business-rule conflicts
pub fn conflict_error(message: impl Into<String>) -> AppError {
    AppError::Conflict(message.into())
}

/// Helper for lifecycle transitions attempted from the wrong state
pub fn invalid_state_error(message: impl Into<String>) -> AppError {
    AppError::InvalidState(message.into())
}
