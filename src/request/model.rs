//! # Request Record
//!
//! The sole entity tracked by the service. Only `status` and
//! `last_edited_date` ever change after creation, and only through
//! [`Request::apply`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::Status;

/// Opaque record identifier, assigned by the store at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap a caller-supplied identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A persisted request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    pub requestor_name: String,
    pub item_requested: String,
    pub status: Status,
    pub created_date: DateTime<Utc>,
    pub last_edited_date: Option<DateTime<Utc>>,
}

impl Request {
    /// Materialize a validated draft under the given identifier
    pub fn from_draft(id: RequestId, draft: NewRequest) -> Self {
        Self {
            id,
            requestor_name: draft.requestor_name,
            item_requested: draft.item_requested,
            status: draft.status,
            created_date: draft.created_date,
            last_edited_date: None,
        }
    }

    /// Apply a status transition.
    ///
    /// The edit timestamp never moves backwards and never precedes
    /// `created_date`, even if the patch was stamped by a lagging clock.
    /// Setting the current status again still counts as an edit.
    pub fn apply(&mut self, patch: &StatusPatch) {
        let floor = self.last_edited_date.unwrap_or(self.created_date);
        self.status = patch.status;
        self.last_edited_date = Some(patch.edited_at.max(floor));
    }
}

/// A validated request ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    pub requestor_name: String,
    pub item_requested: String,
    pub status: Status,
    pub created_date: DateTime<Utc>,
}

/// The only mutation a stored request accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPatch {
    pub status: Status,
    pub edited_at: DateTime<Utc>,
}

impl StatusPatch {
    pub fn new(status: Status, edited_at: DateTime<Utc>) -> Self {
        Self { status, edited_at }
    }

    /// Patch stamped with the current time
    pub fn now(status: Status) -> Self {
        Self::new(status, Utc::now())
    }
}
