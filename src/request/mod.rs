//! # Request Domain
//!
//! Record shape, status enum, and payload validation.

pub mod field;
pub mod model;
pub mod status;
pub mod validator;

pub use field::{FieldText, RawField};
pub use model::{NewRequest, Request, RequestId, StatusPatch};
pub use status::Status;
pub use validator::{
    validate_create, validate_target_id, validate_target_status, CreateRequestInput,
};
