//! # Request Tracker HTTP Server
//!
//! Routing collaborator for the request service.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `PUT /api/request` - Create a request
//! - `GET /api/request?page=&status=` - List requests, newest first
//! - `PATCH /api/request` - Update one request's status
//! - `PATCH /api/requests/edit` - Batch status update
//! - `DELETE /api/requests` - Batch delete

pub mod config;
pub mod health_routes;
pub mod request_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
