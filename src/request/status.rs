//! # Request Status
//!
//! The four lifecycle states a request can be in. Every operation that
//! accepts a status from a caller goes through [`Status::parse`], so the
//! membership rule lives in exactly one place.
//!
//! No state is terminal: any status may move to any other status. The only
//! rule enforced is that the target is a member of the enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RequestError;

/// Lifecycle stage of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Awaiting a decision (initial state)
    #[default]
    Pending,

    /// Accepted, not yet fulfilled
    Approved,

    /// Declined
    Rejected,

    /// Fulfilled
    Completed,
}

impl Status {
    /// All statuses, in declaration order
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Approved,
        Status::Rejected,
        Status::Completed,
    ];

    /// Get the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
            Status::Completed => "completed",
        }
    }

    /// Parse a caller-supplied status.
    ///
    /// Matching is exact: `"Approved"` and `" approved"` are rejected.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::InvalidStatus` carrying the attempted value.
    pub fn parse(value: &str) -> Result<Self, RequestError> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| RequestError::InvalidStatus(value.to_string()))
    }

    /// Comma-separated list of accepted values, for error messages
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(Status::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::parse(s)
    }
}
