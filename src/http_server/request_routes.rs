//! Request HTTP Routes
//!
//! Thin bindings from HTTP onto [`RequestService`]. Every failure, including
//! an unparsable body or query string, leaves as a classified
//! [`RequestError`].

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::{delete, patch, put},
    Json, Router,
};
use serde::Deserialize;

use super::response::{BatchDeletedData, BatchUpdatedData, CreatedData, Envelope, UpdatedData};
use crate::batch::StatusUpdateItem;
use crate::errors::{RequestError, RequestResult};
use crate::query::{ListQuery, RequestPage};
use crate::request::CreateRequestInput;
use crate::service::{RequestService, UpdateStatusInput};

// ==================
// Shared State
// ==================

/// Request state shared across handlers
pub struct RequestState {
    pub service: RequestService,
}

impl RequestState {
    pub fn new(service: RequestService) -> Self {
        Self { service }
    }
}

// ==================
// Request Bodies
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct BatchUpdateBody {
    #[serde(default)]
    pub updates: Option<Vec<StatusUpdateItem>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchDeleteBody {
    #[serde(default)]
    pub deletions: Option<Vec<String>>,
}

// ==================
// Request Routes
// ==================

/// Create request routes
pub fn request_routes(state: Arc<RequestState>) -> Router {
    Router::new()
        .route(
            "/request",
            put(create_request_handler)
                .get(list_requests_handler)
                .patch(update_request_handler),
        )
        .route("/requests/edit", patch(batch_edit_handler))
        .route("/requests", delete(batch_delete_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> RequestResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| RequestError::invalid_input(rejection.body_text()))
}

// ==================
// Handlers
// ==================

async fn create_request_handler(
    State(state): State<Arc<RequestState>>,
    payload: Result<Json<CreateRequestInput>, JsonRejection>,
) -> RequestResult<(StatusCode, Json<Envelope<CreatedData>>)> {
    let input = body(payload)?;
    let request = state.service.create_request(input)?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Created", CreatedData { request })),
    ))
}

async fn list_requests_handler(
    State(state): State<Arc<RequestState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> RequestResult<Json<Envelope<RequestPage>>> {
    let Query(query) =
        query.map_err(|rejection| RequestError::invalid_input(rejection.body_text()))?;
    let page = state.service.list_requests(&query)?;

    Ok(Json(Envelope::new("Success", page)))
}

async fn update_request_handler(
    State(state): State<Arc<RequestState>>,
    payload: Result<Json<UpdateStatusInput>, JsonRejection>,
) -> RequestResult<Json<Envelope<UpdatedData>>> {
    let input = body(payload)?;
    let updated_request = state.service.update_status(input)?;

    Ok(Json(Envelope::new(
        "Successfully updated",
        UpdatedData { updated_request },
    )))
}

async fn batch_edit_handler(
    State(state): State<Arc<RequestState>>,
    payload: Result<Json<BatchUpdateBody>, JsonRejection>,
) -> RequestResult<Json<Envelope<BatchUpdatedData>>> {
    let updates = body(payload)?.updates.unwrap_or_default();
    let updated = state.service.batch_update_status(&updates)?;

    Ok(Json(Envelope::new(
        "Successfully updated",
        BatchUpdatedData { updated },
    )))
}

async fn batch_delete_handler(
    State(state): State<Arc<RequestState>>,
    payload: Result<Json<BatchDeleteBody>, JsonRejection>,
) -> RequestResult<Json<Envelope<BatchDeletedData>>> {
    let deletions = body(payload)?.deletions.unwrap_or_default();
    let deleted = state.service.batch_delete(&deletions)?;

    Ok(Json(Envelope::new(
        "Successfully deleted",
        BatchDeletedData { deleted },
    )))
}
