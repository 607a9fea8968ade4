//! # Response Formatting
//!
//! Success envelope shared by every request route:
//! `{ "message": ..., "data": ... }`.

use serde::Serialize;

use crate::request::Request;

/// Envelope around a successful payload
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Payload of a create
#[derive(Debug, Clone, Serialize)]
pub struct CreatedData {
    pub request: Request,
}

/// Payload of a single-record update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedData {
    pub updated_request: Request,
}

/// Payload of a batch status update
#[derive(Debug, Clone, Serialize)]
pub struct BatchUpdatedData {
    pub updated: usize,
}

/// Payload of a batch delete
#[derive(Debug, Clone, Serialize)]
pub struct BatchDeletedData {
    pub deleted: usize,
}
