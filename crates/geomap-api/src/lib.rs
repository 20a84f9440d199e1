//! Geomap API - wire models and request validation
//!
//! This crate provides:
//! - `ObjectRequest`: the inbound `{name, wkt}` body
//! - `Response`: the `{isSuccess, data, message}` envelope every operation answers with
//! - Validation of single and batched requests

pub mod model;
pub mod response;
pub mod validation;

pub use model::ObjectRequest;
pub use response::Response;
pub use validation::{validate_batch, validate_object};
