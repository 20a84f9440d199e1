//! Geomap Common - Shared error types and constants
//!
//! This crate provides the pieces every other Geomap crate agrees on:
//! - `GeomapError`: the failure taxonomy surfaced to clients
//! - Table, column and limit constants shared by validation and storage

pub mod error;

pub use error::GeomapError;

/// Table holding the map objects
pub const OBJECTS_TABLE: &str = "objects";

/// Maximum length of an object name, in characters
pub const NAME_MAX_LENGTH: usize = 40;

/// Minimum length of an object name, in characters
pub const NAME_MIN_LENGTH: usize = 1;

/// Spatial reference identifier for every stored geometry
pub const STORAGE_SRID: i32 = 4326;

/// Envelope messages for successful operations
pub const MSG_CREATED: &str = "created";
pub const MSG_FOUND: &str = "found";
pub const MSG_LISTED: &str = "listed";
pub const MSG_UPDATED: &str = "updated";
pub const MSG_DELETED: &str = "deleted";
