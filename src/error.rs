//! Error types for the booking server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::booking::BookingIssue;

/// Numeric error codes returned in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    StorageUnavailable = 2,
    NoSuchData = 3,
    BadValue = 4,
    InvalidTimeFormat = 5,
    BookingRejected = 6,
    SchedulingConflict = 7,
    NotCancellable = 8,
    NotModifiable = 9,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidTimeFormat(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Overlap detected by the storage exclusion constraint
    #[error("Scheduling conflict: {0}")]
    SchedulingConflict(String),

    #[error("Booking rejected")]
    BookingRejected(Vec<BookingIssue>),

    #[error("Reservation cannot be cancelled: {0}")]
    NotCancellable(String),

    #[error("Reservation cannot be modified: {0}")]
    NotModifiable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Storage failures are never retried here; callers own the retry policy
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::StorageUnavailable(_))
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Failed booking checks, for rejected bookings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<BookingIssue>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = Vec::new();
        let (status, code, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg),
            AppError::InvalidTimeFormat(msg) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidTimeFormat, msg),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::StorageUnavailable,
                    "Storage unavailable".to_string(),
                )
            }
            AppError::StorageUnavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorCode::StorageUnavailable,
                    "Storage unavailable".to_string(),
                )
            }
            AppError::SchedulingConflict(msg) => (StatusCode::CONFLICT, ErrorCode::SchedulingConflict, msg),
            AppError::BookingRejected(issues) => {
                details = issues;
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorCode::BookingRejected,
                    "Booking rejected".to_string(),
                )
            }
            AppError::NotCancellable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::NotCancellable, msg),
            AppError::NotModifiable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::NotModifiable, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
