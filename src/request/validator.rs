//! Payload validation.
//!
//! Create validation runs over the whole candidate before anything touches
//! the store. The first failing field (in the order requestorName,
//! itemRequested, status) is reported and nothing is persisted.
//!
//! Status changes, single or batched, check their id and target status
//! through [`validate_target_id`] and [`validate_target_status`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::field::{FieldText, RawField};
use super::model::{NewRequest, RequestId};
use super::status::Status;
use crate::errors::{RequestError, RequestResult};

/// Character bounds for `requestorName`
pub const REQUESTOR_NAME_LEN: (usize, usize) = (3, 30);

/// Character bounds for `itemRequested`
pub const ITEM_REQUESTED_LEN: (usize, usize) = (2, 100);

/// Raw create payload as supplied by a caller.
///
/// Any `createdDate`, `lastEditedDate` or `id` in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestInput {
    #[serde(default)]
    pub requestor_name: RawField,
    #[serde(default)]
    pub item_requested: RawField,
    #[serde(default)]
    pub status: RawField,
}

impl CreateRequestInput {
    pub fn new(requestor_name: impl Into<String>, item_requested: impl Into<String>) -> Self {
        Self {
            requestor_name: RawField::text(requestor_name),
            item_requested: RawField::text(item_requested),
            status: RawField::missing(),
        }
    }

    pub fn with_status(mut self, status: impl Into<RawField>) -> Self {
        self.status = status.into();
        self
    }
}

/// Validate a create payload, stamping it with `created_date`.
///
/// # Errors
///
/// Returns `RequestError::Validation` naming the first offending field.
pub fn validate_create(
    input: CreateRequestInput,
    created_date: DateTime<Utc>,
) -> RequestResult<NewRequest> {
    let requestor_name = bounded_text("requestorName", &input.requestor_name, REQUESTOR_NAME_LEN)?;
    let item_requested = bounded_text("itemRequested", &input.item_requested, ITEM_REQUESTED_LEN)?;

    let not_a_status = |raw: &dyn std::fmt::Display| {
        RequestError::validation(
            "status",
            format!(
                "'{}' is not a valid status (expected one of: {})",
                raw,
                Status::allowed_values()
            ),
        )
    };
    let status = match input.status.as_text() {
        FieldText::Missing => Status::default(),
        FieldText::Text(raw) => Status::parse(raw).map_err(|_| not_a_status(&raw))?,
        FieldText::Mistyped(value) => return Err(not_a_status(value)),
    };

    Ok(NewRequest {
        requestor_name,
        item_requested,
        status,
        created_date,
    })
}

/// Validate the id of a status change. Surrounding whitespace is dropped.
///
/// # Errors
///
/// `InvalidInput` if the id is missing, blank, or not a string.
pub fn validate_target_id(id: &RawField) -> RequestResult<RequestId> {
    match id.as_text() {
        FieldText::Text(raw) if !raw.trim().is_empty() => Ok(RequestId::new(raw.trim())),
        FieldText::Mistyped(_) => Err(RequestError::invalid_input("id must be a string")),
        _ => Err(RequestError::invalid_input("id is required")),
    }
}

/// Validate the target status of a status change.
///
/// # Errors
///
/// - `InvalidInput` if the status is missing or blank.
/// - `InvalidStatus` if it is not a string or not a known status.
pub fn validate_target_status(status: &RawField) -> RequestResult<Status> {
    match status.as_text() {
        FieldText::Missing => Err(RequestError::invalid_input("status is required")),
        FieldText::Text(raw) if raw.trim().is_empty() => {
            Err(RequestError::invalid_input("status is required"))
        }
        FieldText::Text(raw) => Status::parse(raw),
        FieldText::Mistyped(value) => Err(RequestError::InvalidStatus(value.to_string())),
    }
}

/// Trim and bound-check a required text field
fn bounded_text(
    field: &'static str,
    value: &RawField,
    (min, max): (usize, usize),
) -> RequestResult<String> {
    let trimmed = match value.as_text() {
        FieldText::Missing => "",
        FieldText::Text(raw) => raw.trim(),
        FieldText::Mistyped(_) => return Err(RequestError::validation(field, "must be a string")),
    };
    if trimmed.is_empty() {
        return Err(RequestError::validation(field, "is required"));
    }

    let len = trimmed.chars().count();
    if len < min {
        return Err(RequestError::validation(
            field,
            format!("must be at least {} characters long", min),
        ));
    }
    if len > max {
        return Err(RequestError::validation(
            field,
            format!("must not exceed {} characters", max),
        ));
    }

    Ok(trimmed.to_string())
}
