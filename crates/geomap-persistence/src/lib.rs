//! Geomap Persistence - Database entities and persistence layer
//!
//! This crate provides:
//! - SeaORM entity for the `objects` table with a spatial column converter
//! - The `ObjectPersistence` / `PersistenceService` trait abstraction
//! - Three interchangeable backends: raw SQL, ORM and in-memory
//! - Schema bootstrap for PostGIS

pub mod entity;
pub mod memory;
pub mod model;
pub mod orm;
pub mod schema;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export persistence traits
pub use traits::{ObjectPersistence, PersistenceService};

// Re-export backends
pub use memory::MemoryPersistService;
pub use orm::OrmObjectPersistService;
pub use sql::SqlObjectPersistService;

// Re-export model types
pub use model::{NewObject, ObjectRecord, StorageMode};
