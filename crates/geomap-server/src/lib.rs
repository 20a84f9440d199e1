//! Geomap server library
//!
//! Wires the geometry codec, validation and persistence crates into an HTTP
//! service: configuration, logging, middleware, the object service facade and
//! its routes.

pub mod api; // HTTP handlers and route registration
pub mod middleware; // HTTP middleware
pub mod model; // Configuration, constants and shared application state
pub mod service; // Object service facade
pub mod startup; // Logging, storage and HTTP server bootstrap

pub use model::{AppState, Configuration};
pub use service::ObjectService;
