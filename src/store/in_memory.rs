//! In-memory request store.
//!
//! Documents live in a `HashMap` behind an `RwLock`. Each insert also gets a
//! sequence number so that requests created within the same clock tick still
//! sort deterministically (later insert first under `CreatedDesc`).

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::request::{NewRequest, Request, RequestId, StatusPatch};

use super::{RequestFilter, RequestStore, SortOrder, StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredRequest {
    seq: u64,
    request: Request,
}

#[derive(Debug, Default)]
struct Collection {
    documents: HashMap<RequestId, StoredRequest>,
    next_seq: u64,
}

/// `RequestStore` backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    collection: RwLock<Collection>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests
    pub fn len(&self) -> usize {
        self.read().map(|c| c.documents.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a single request by id
    pub fn get(&self, id: &RequestId) -> StoreResult<Option<Request>> {
        Ok(self.read()?.documents.get(id).map(|s| s.request.clone()))
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collection>> {
        self.collection.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collection>> {
        self.collection.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl RequestStore for InMemoryRequestStore {
    fn create(&self, draft: NewRequest) -> StoreResult<Request> {
        let mut collection = self.write()?;

        let mut id = RequestId::generate();
        while collection.documents.contains_key(&id) {
            id = RequestId::generate();
        }

        let request = Request::from_draft(id.clone(), draft);
        let seq = collection.next_seq;
        collection.next_seq += 1;
        collection.documents.insert(
            id,
            StoredRequest {
                seq,
                request: request.clone(),
            },
        );

        Ok(request)
    }

    fn find(
        &self,
        filter: &RequestFilter,
        sort: SortOrder,
        skip: usize,
        limit: usize,
    ) -> StoreResult<Vec<Request>> {
        let collection = self.read()?;

        let mut matching: Vec<&StoredRequest> = collection
            .documents
            .values()
            .filter(|stored| filter.matches(&stored.request))
            .collect();

        matching.sort_by(|a, b| {
            let ascending = a
                .request
                .created_date
                .cmp(&b.request.created_date)
                .then(a.seq.cmp(&b.seq));
            match sort {
                SortOrder::CreatedAsc => ascending,
                SortOrder::CreatedDesc => ascending.reverse(),
            }
        });

        Ok(matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|stored| stored.request.clone())
            .collect())
    }

    fn count_documents(&self, filter: &RequestFilter) -> StoreResult<usize> {
        let collection = self.read()?;
        Ok(collection
            .documents
            .values()
            .filter(|stored| filter.matches(&stored.request))
            .count())
    }

    fn find_by_id_and_update(
        &self,
        id: &RequestId,
        patch: &StatusPatch,
    ) -> StoreResult<Option<Request>> {
        let mut collection = self.write()?;

        Ok(collection.documents.get_mut(id).map(|stored| {
            stored.request.apply(patch);
            stored.request.clone()
        }))
    }

    fn delete_many(&self, ids: &[RequestId]) -> StoreResult<usize> {
        let mut collection = self.write()?;
        Ok(ids
            .iter()
            .filter(|id| collection.documents.remove(*id).is_some())
            .count())
    }
}
