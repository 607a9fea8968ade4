//! # Request Listing
//!
//! Turns raw `page` / `status` query parameters into a validated
//! [`PageRequest`], runs it against a store, and assembles the
//! [`RequestPage`] returned to callers.
//!
//! Pages are 1-based. Results are always newest first. A page past the end
//! is not an error: it comes back empty with accurate totals.

use serde::{Deserialize, Serialize};

use crate::errors::{RequestError, RequestResult};
use crate::request::{Request, Status};
use crate::store::{RequestFilter, RequestStore, SortOrder};

/// Raw listing parameters, exactly as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ListQuery {
    pub fn page(page: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A validated listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
    pub filter: RequestFilter,
}

impl PageRequest {
    /// Validate raw parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidPagination` if `page` is missing, not an integer, or below 1.
    ///   Out-of-range values are never clamped. A page too large to
    ///   represent is just past the end and lists nothing.
    /// - `InvalidStatus` if a non-empty `status` is not a known status.
    pub fn parse(query: &ListQuery, page_size: usize) -> RequestResult<Self> {
        let raw_page = query.page.as_deref().unwrap_or_default();
        let invalid = || RequestError::InvalidPagination {
            page: raw_page.to_string(),
            page_size,
        };

        let page = parse_page(raw_page).ok_or_else(invalid)?;

        let filter = match query.status.as_deref() {
            None | Some("") => RequestFilter::all(),
            Some(raw) => RequestFilter::status(Status::parse(raw)?),
        };

        Ok(Self {
            page,
            page_size,
            filter,
        })
    }

    /// Zero-based offset of the first record on this page
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Positive integer page number; overflow saturates
fn parse_page(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match digits.parse::<usize>() {
        Ok(0) => None,
        Ok(page) => Some(page),
        Err(_) => Some(usize::MAX),
    }
}

/// One page of requests plus totals over the whole filter
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPage {
    pub page: usize,
    pub page_size: usize,
    pub total_requests: usize,
    pub total_pages: usize,
    pub records: Vec<Request>,
}

/// Number of pages needed for `total` records
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Run a listing against the store
pub fn list_page<S: RequestStore + ?Sized>(
    store: &S,
    request: &PageRequest,
) -> RequestResult<RequestPage> {
    let total_requests = store.count_documents(&request.filter)?;
    let records = store.find(
        &request.filter,
        SortOrder::CreatedDesc,
        request.offset(),
        request.page_size,
    )?;

    Ok(RequestPage {
        page: request.page,
        page_size: request.page_size,
        total_requests,
        total_pages: total_pages(total_requests, request.page_size),
        records,
    })
}
