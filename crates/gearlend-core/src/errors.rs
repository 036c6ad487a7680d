//! Error types for gearlend.
//!
//! Two layers live here:
//!
//! - [`DomainError`]: what the lending rules can say "no" with (bad credentials,
//!   insufficient stock, unsupported upload, ...). Services return these.
//! - [`AppError`]: the HTTP boundary error. It carries a status code, a stable
//!   machine-readable `code` and the underlying [`anyhow::Error`], and renders as
//!   `{"error": "...", "code": "..."}`.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

use crate::file_storage::StorageError;

/// Reason a loan request was not granted.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LoanDenial {
    #[error("Item {item_id} not found")]
    ItemNotFound { item_id: i64 },

    #[error("Insufficient stock: requested {requested}, only {available} available")]
    InsufficientStock { requested: i64, available: i64 },

    #[error("Item {item_id} is not available for lending")]
    ItemUnavailable { item_id: i64 },
}

impl LoanDenial {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ItemNotFound { .. } => "item_not_found",
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::ItemUnavailable { .. } => "item_unavailable",
        }
    }
}

/// Business rule failures raised by the service layer.
#[derive(Debug, ThisError)]
pub enum DomainError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unknown student number")]
    UnknownStudentNumber,

    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    LoanDenied(#[from] LoanDenial),

    #[error("Unsupported image type '{extension}'. Allowed types: png, jpg, jpeg")]
    UnsupportedImageType { extension: String },

    #[error("{0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::UnknownStudentNumber => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::LoanDenied(LoanDenial::ItemNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::LoanDenied(_) => StatusCode::CONFLICT,
            Self::UnsupportedImageType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::UnknownStudentNumber => "unknown_student_number",
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::LoanDenied(denial) => denial.code(),
            Self::UnsupportedImageType { .. } => "unsupported_image_type",
            Self::Conflict(_) => "conflict",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub error: Error,
}

fn default_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "bad_request",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "not_found",
        StatusCode::CONFLICT => "conflict",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
        StatusCode::UNPROCESSABLE_ENTITY => "validation_error",
        _ => "internal_error",
    }
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code: default_code(status),
            error: err.into(),
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }
}

/// Maps a unique constraint violation to a 409, anything else to a 500.
pub fn conflict_on_unique(err: sqlx::Error, message: impl FnOnce() -> String) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DomainError::Conflict(message()).into();
        }
    }
    AppError::database(err)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side failures are logged in full but never echoed to the client.
        let message = if self.status.is_server_error() {
            tracing::error!(error = ?self.error, code = self.code, "request failed");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": message,
            "code": self.code,
        }));

        (self.status, body).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let status = err.status();
        let code = err.code();
        Self::new(status, err).with_code(code)
    }
}

impl From<LoanDenial> for AppError {
    fn from(denial: LoanDenial) -> Self {
        DomainError::from(denial).into()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnsupportedExtension { extension } => {
                DomainError::UnsupportedImageType { extension }.into()
            }
            StorageError::InvalidFileSize { max_bytes } => DomainError::validation(
                "image",
                format!("File exceeds maximum size of {} bytes", max_bytes),
            )
            .into(),
            other @ StorageError::InvalidKey(_) => AppError::bad_request(other),
            other @ StorageError::NotFound => AppError::not_found(other),
            other @ StorageError::IoError(_) => AppError::internal(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_maps_to_conflict() {
        let err: AppError = LoanDenial::InsufficientStock {
            requested: 2,
            available: 1,
        }
        .into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, "insufficient_stock");
        assert_eq!(
            err.error.to_string(),
            "Insufficient stock: requested 2, only 1 available"
        );
    }

    #[test]
    fn test_missing_item_denial_maps_to_not_found() {
        let err: AppError = LoanDenial::ItemNotFound { item_id: 9 }.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "item_not_found");
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        let err: AppError = DomainError::InvalidCredentials.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, "invalid_credentials");

        let err: AppError = DomainError::UnknownStudentNumber.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.code, "unknown_student_number");
    }

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Item", 42);
        assert_eq!(err.to_string(), "Item 42 not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_extension_error_becomes_unsupported_image() {
        let err: AppError = StorageError::UnsupportedExtension {
            extension: "gif".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.code, "unsupported_image_type");
    }

    #[test]
    fn test_default_codes_follow_status() {
        assert_eq!(AppError::forbidden("no".into()).code, "forbidden");
        assert_eq!(AppError::unauthorized("no".into()).code, "unauthorized");
        assert_eq!(
            AppError::bad_request(anyhow::anyhow!("bad")).code,
            "bad_request"
        );
    }
}
