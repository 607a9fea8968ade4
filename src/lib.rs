//! request-tracker - lifecycle tracking for item requests
//!
//! A request records who asked for what and where it stands
//! (`pending`, `approved`, `rejected`, `completed`). The crate provides
//! validation, newest-first paged listing, single and batch status
//! updates, and batch deletes over a pluggable [`store::RequestStore`],
//! plus an axum server exposing them.

pub mod batch;
pub mod cli;
pub mod config;
pub mod errors;
pub mod http_server;
pub mod query;
pub mod request;
pub mod service;
pub mod store;

pub use errors::{ErrorKind, Outcome, RequestError, RequestResult};
pub use request::{Request, RequestId, Status};
pub use service::RequestService;
pub use store::{InMemoryRequestStore, RequestStore};
