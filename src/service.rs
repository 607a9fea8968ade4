//! # Request Service
//!
//! The five request operations. Each one validates its input, runs against
//! the store, and returns an already-classified [`RequestError`] on failure.
//! Store faults become `Unknown`; their detail is logged here and goes no
//! further.
//!
//! The service holds no state of its own beyond the store handle, so it can
//! be shared freely across concurrent callers.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::batch::{BatchCoordinator, StatusUpdateItem};
use crate::errors::{ErrorKind, RequestError, RequestResult};
use crate::query::{list_page, ListQuery, PageRequest, RequestPage};
use crate::request::{
    validate_create, validate_target_id, validate_target_status, CreateRequestInput, RawField,
    Request, StatusPatch,
};
use crate::store::RequestStore;

/// Default number of records per listing page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Single-record status change, as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatusInput {
    #[serde(default)]
    pub id: RawField,
    #[serde(default)]
    pub status: RawField,
}

impl UpdateStatusInput {
    pub fn new(id: impl Into<RawField>, status: impl Into<RawField>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
        }
    }
}

/// Request lifecycle operations over a shared store
#[derive(Clone)]
pub struct RequestService {
    store: Arc<dyn RequestStore>,
    page_size: usize,
}

impl RequestService {
    pub fn new(store: Arc<dyn RequestStore>) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    /// A `page_size` of 0 is treated as 1.
    pub fn with_page_size(store: Arc<dyn RequestStore>, page_size: usize) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Validate and persist a new request
    pub fn create_request(&self, input: CreateRequestInput) -> RequestResult<Request> {
        let result = validate_create(input, Utc::now())
            .and_then(|draft| self.store.create(draft).map_err(RequestError::from));

        if let Ok(request) = &result {
            info!(id = %request.id, status = %request.status, "request created");
        }
        observe("create_request", result)
    }

    /// One page of requests, newest first
    pub fn list_requests(&self, query: &ListQuery) -> RequestResult<RequestPage> {
        let result = PageRequest::parse(query, self.page_size)
            .and_then(|page| list_page(&*self.store, &page));

        if let Ok(page) = &result {
            info!(
                page = page.page,
                returned = page.records.len(),
                total = page.total_requests,
                "requests listed"
            );
        }
        observe("list_requests", result)
    }

    /// Set one request's status. Re-setting the current status still
    /// counts as an edit and bumps `last_edited_date`.
    pub fn update_status(&self, input: UpdateStatusInput) -> RequestResult<Request> {
        let result = self.try_update_status(input);

        if let Ok(request) = &result {
            info!(id = %request.id, status = %request.status, "request status updated");
        }
        observe("update_status", result)
    }

    fn try_update_status(&self, input: UpdateStatusInput) -> RequestResult<Request> {
        let id = validate_target_id(&input.id)?;
        let status = validate_target_status(&input.status)?;

        self.store
            .find_by_id_and_update(&id, &StatusPatch::now(status))?
            .ok_or(RequestError::NotFound(id))
    }

    /// Sequential, non-transactional status updates
    pub fn batch_update_status(&self, updates: &[StatusUpdateItem]) -> RequestResult<usize> {
        let result = BatchCoordinator::new(&*self.store).update_statuses(updates);

        if let Ok(updated) = &result {
            info!(updated, "batch status update applied");
        }
        observe("batch_update_status", result)
    }

    /// Delete all listed ids in one store call
    pub fn batch_delete(&self, deletions: &[String]) -> RequestResult<usize> {
        let result = BatchCoordinator::new(&*self.store).delete(deletions);

        if let Ok(deleted) = &result {
            info!(deleted, "batch delete applied");
        }
        observe("batch_delete", result)
    }
}

/// Log a failed operation at a level matching its classification
fn observe<T>(operation: &'static str, result: RequestResult<T>) -> RequestResult<T> {
    if let Err(err) = &result {
        match (err.kind(), err) {
            (ErrorKind::UnknownError, RequestError::Unknown { detail }) => {
                error!(operation, detail = %detail, "request operation failed");
            }
            (ErrorKind::UnknownError, RequestError::BatchInterrupted { cause, .. }) => {
                error!(operation, error = ?cause, "request operation failed");
            }
            (kind, _) => {
                warn!(operation, ?kind, error = %err, "request rejected");
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryRequestStore;

    fn service() -> RequestService {
        RequestService::with_page_size(Arc::new(InMemoryRequestStore::new()), 2)
    }

    #[test]
    fn test_create_then_list() {
        let svc = service();
        svc.create_request(CreateRequestInput::new("Alice", "Tent")).unwrap();

        let page = svc.list_requests(&ListQuery::page("1")).unwrap();
        assert_eq!(page.total_requests, 1);
        assert_eq!(page.records[0].requestor_name, "Alice");
    }

    #[test]
    fn test_zero_page_size_is_raised_to_one() {
        let svc = RequestService::with_page_size(Arc::new(InMemoryRequestStore::new()), 0);
        assert_eq!(svc.page_size(), 1);
    }

    #[test]
    fn test_update_requires_id_and_status() {
        let svc = service();
        for input in [
            UpdateStatusInput::default(),
            UpdateStatusInput::new("abc", RawField::missing()),
            UpdateStatusInput::new("abc", "   "),
            UpdateStatusInput::new("", "approved"),
        ] {
            let err = svc.update_status(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInputError);
        }
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let svc = service();
        let err = svc
            .update_status(UpdateStatusInput::new("missing", "approved"))
            .unwrap_err();
        assert!(matches!(err, RequestError::NotFound(ref id) if id.as_str() == "missing"));
    }

    #[test]
    fn test_invalid_status_checked_before_lookup() {
        let svc = service();
        let err = svc
            .update_status(UpdateStatusInput::new("missing", "bogus"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStatusError);
    }
}
