//! # Request Store
//!
//! The persistence boundary. The service only ever talks to storage through
//! the five calls on [`RequestStore`], so any engine (document, relational,
//! in-memory) can sit behind it.
//!
//! Identifier assignment and uniqueness belong to the store.

pub mod in_memory;

use thiserror::Error;

use crate::request::{NewRequest, Request, RequestId, Status, StatusPatch};

pub use in_memory::InMemoryRequestStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage faults. These are never shown to callers as-is.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A writer panicked while holding the lock
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// Backend is unreachable or refused the call
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Exact-match selection over stored requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub status: Option<Status>,
}

impl RequestFilter {
    /// Match every request
    pub fn all() -> Self {
        Self::default()
    }

    /// Match requests in the given status
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn matches(&self, request: &Request) -> bool {
        self.status.map_or(true, |s| request.status == s)
    }
}

/// Result ordering for [`RequestStore::find`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest `created_date` first
    #[default]
    CreatedDesc,

    /// Oldest `created_date` first
    CreatedAsc,
}

/// Persistence collaborator for requests
pub trait RequestStore: Send + Sync {
    /// Persist a validated draft, assigning it a fresh id
    fn create(&self, draft: NewRequest) -> StoreResult<Request>;

    /// Select, order, then window matching requests
    fn find(
        &self,
        filter: &RequestFilter,
        sort: SortOrder,
        skip: usize,
        limit: usize,
    ) -> StoreResult<Vec<Request>>;

    /// Count matching requests, ignoring any window
    fn count_documents(&self, filter: &RequestFilter) -> StoreResult<usize>;

    /// Apply a status patch, returning the updated record if the id exists
    fn find_by_id_and_update(
        &self,
        id: &RequestId,
        patch: &StatusPatch,
    ) -> StoreResult<Option<Request>>;

    /// Remove every request whose id is in `ids` in one call.
    ///
    /// Unknown ids are ignored. Returns how many records were removed.
    fn delete_many(&self, ids: &[RequestId]) -> StoreResult<usize>;
}
