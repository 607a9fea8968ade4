//! # Request Errors
//!
//! Every failure surfaced by a request operation is one of these variants.
//! Each variant classifies into exactly one [`ErrorKind`], and each kind
//! maps onto a stable [`Outcome`] (and from there an HTTP status).
//!
//! `Unknown` is the catch-all for anything unexpected. Its detail is kept for
//! logging only and is never rendered to callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::request::{RequestId, Status};
use crate::store::StoreError;

/// Result type for request operations
pub type RequestResult<T> = Result<T, RequestError>;

/// Request operation errors
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed create/update field
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Status outside the enumerated set
    #[error("Invalid status '{0}'. Must be one of: {}", Status::allowed_values())]
    InvalidStatus(String),

    /// Page is not an integer >= 1
    #[error("Invalid page '{page}': page must be a number greater than 0 (page size {page_size})")]
    InvalidPagination { page: String, page_size: usize },

    /// Missing or empty required input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Update target does not exist
    #[error("Request not found: {0}")]
    NotFound(RequestId),

    /// A batch stopped part-way; items before `failed_index` stay applied
    #[error("Batch stopped at item {failed_index} after {applied} applied: {cause}")]
    BatchInterrupted {
        applied: usize,
        failed_index: usize,
        cause: Box<RequestError>,
    },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Anything unclassified. The detail is for logs only.
    #[error("An unknown error occurred")]
    Unknown { detail: String },
}

/// Classification of a [`RequestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ValidationError,
    InvalidStatusError,
    InvalidPaginationError,
    InvalidInputError,
    NotFoundError,
    UnknownError,
}

impl ErrorKind {
    pub fn outcome(&self) -> Outcome {
        match self {
            ErrorKind::ValidationError
            | ErrorKind::InvalidStatusError
            | ErrorKind::InvalidPaginationError
            | ErrorKind::InvalidInputError => Outcome::BadRequest,
            ErrorKind::NotFoundError => Outcome::NotFound,
            ErrorKind::UnknownError => Outcome::InternalError,
        }
    }
}

/// Caller-facing outcome code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    BadRequest,
    NotFound,
    InternalError,
}

impl Outcome {
    /// Get HTTP status code for this outcome
    pub fn status_code(&self) -> StatusCode {
        match self {
            Outcome::BadRequest => StatusCode::BAD_REQUEST,
            Outcome::NotFound => StatusCode::NOT_FOUND,
            Outcome::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short message placed in the response envelope
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::BadRequest => "Invalid input",
            Outcome::NotFound => "Not found",
            Outcome::InternalError => "Unknown error",
        }
    }
}

impl RequestError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self::Unknown {
            detail: detail.into(),
        }
    }

    /// Wrap an item failure with the batch progress made before it
    pub fn interrupted(applied: usize, failed_index: usize, cause: RequestError) -> Self {
        Self::BatchInterrupted {
            applied,
            failed_index,
            cause: Box::new(cause),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::ValidationError,
            Self::InvalidStatus(_) => ErrorKind::InvalidStatusError,
            Self::InvalidPagination { .. } => ErrorKind::InvalidPaginationError,
            Self::InvalidInput(_) => ErrorKind::InvalidInputError,
            Self::NotFound(_) => ErrorKind::NotFoundError,
            Self::BatchInterrupted { cause, .. } => cause.kind(),
            Self::Unknown { .. } => ErrorKind::UnknownError,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.kind().outcome()
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        self.outcome().status_code()
    }

    /// Caller-safe description. Never exposes `Unknown` details.
    pub fn public_detail(&self) -> String {
        match self {
            Self::BatchInterrupted { cause, .. } => cause.public_detail(),
            _ => self.to_string(),
        }
    }
}

impl From<StoreError> for RequestError {
    fn from(err: StoreError) -> Self {
        Self::unknown(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    pub kind: ErrorKind,
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_index: Option<usize>,
}

impl From<&RequestError> for ErrorResponse {
    fn from(err: &RequestError) -> Self {
        let (applied, failed_index) = match err {
            RequestError::BatchInterrupted {
                applied,
                failed_index,
                ..
            } => (Some(*applied), Some(*failed_index)),
            _ => (None, None),
        };
        let outcome = err.outcome();

        Self {
            message: outcome.message().to_string(),
            kind: err.kind(),
            error: err.public_detail(),
            code: outcome.status_code().as_u16(),
            applied,
            failed_index,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
