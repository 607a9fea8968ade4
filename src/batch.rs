//! # Batch Operations
//!
//! Two list-driven operations with different failure semantics:
//!
//! - **Status update** walks the list in order, validating and writing one
//!   item at a time. The first bad item (or store fault) stops the walk.
//!   Items already written stay written; the error reports how many were
//!   applied and which index failed so callers can reconcile.
//! - **Delete** hands every id to a single `delete_many` call, so it either
//!   happens as one store operation or not at all.
//!
//! Ids that do not resolve are not errors in either operation.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{RequestError, RequestResult};
use crate::request::{
    validate_target_id, validate_target_status, RawField, RequestId, Status, StatusPatch,
};
use crate::store::RequestStore;

/// One entry of a batch status update, as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusUpdateItem {
    #[serde(default)]
    pub id: RawField,
    #[serde(default)]
    pub status: RawField,
}

impl StatusUpdateItem {
    pub fn new(id: impl Into<RawField>, status: impl Into<RawField>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
        }
    }

    /// Validate this item into a target id and status
    fn resolve(&self) -> RequestResult<(RequestId, Status)> {
        Ok((validate_target_id(&self.id)?, validate_target_status(&self.status)?))
    }
}

/// Applies batch operations against a store
pub struct BatchCoordinator<'a, S: RequestStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RequestStore + ?Sized> BatchCoordinator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Update statuses sequentially, stopping at the first failure.
    ///
    /// Returns the number of items attempted. An id that matches nothing
    /// still counts as attempted.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `items` is empty.
    /// - `BatchInterrupted` wrapping the failing item's error otherwise.
    pub fn update_statuses(&self, items: &[StatusUpdateItem]) -> RequestResult<usize> {
        if items.is_empty() {
            return Err(RequestError::invalid_input(
                "updates must be a non-empty list of {id, status} pairs",
            ));
        }

        items
            .iter()
            .enumerate()
            .try_fold(0usize, |applied, (index, item)| {
                self.apply_one(item)
                    .map(|_| applied + 1)
                    .map_err(|cause| {
                        warn!(applied, index, error = %cause, "batch status update interrupted");
                        RequestError::interrupted(applied, index, cause)
                    })
            })
    }

    fn apply_one(&self, item: &StatusUpdateItem) -> RequestResult<()> {
        let (id, status) = item.resolve()?;
        let updated = self
            .store
            .find_by_id_and_update(&id, &StatusPatch::now(status))?;

        if updated.is_none() {
            debug!(id = %id, "batch status update target not found; skipped");
        }
        Ok(())
    }

    /// Delete every listed id in one store call.
    ///
    /// Returns the number of ids submitted, not the number removed.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `ids` is empty or contains a blank id; `Unknown` on
    /// a store fault.
    pub fn delete(&self, ids: &[String]) -> RequestResult<usize> {
        if ids.is_empty() {
            return Err(RequestError::invalid_input(
                "deletions must be a non-empty list of ids",
            ));
        }
        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(RequestError::invalid_input("deletions must not contain empty ids"));
        }

        let ids: Vec<RequestId> = ids.iter().map(|id| RequestId::new(id.trim())).collect();
        let removed = self.store.delete_many(&ids)?;
        debug!(submitted = ids.len(), removed, "batch delete applied");

        Ok(ids.len())
    }
}
