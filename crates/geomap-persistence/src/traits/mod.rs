//! Persistence traits for the storage abstraction layer
//!
//! Backends: parameterized SQL, SeaORM entity mapping (both against PostGIS) and
//! a process-owned in-memory table.

pub mod object;

pub use object::ObjectPersistence;

use async_trait::async_trait;

use crate::model::StorageMode;

/// Unified persistence service trait
///
/// This is the interface the service layer holds. Implementations are chosen
/// once at startup based on the configured mode.
#[async_trait]
pub trait PersistenceService: ObjectPersistence + Send + Sync {
    /// Get the current storage mode
    fn storage_mode(&self) -> StorageMode;

    /// Health check for the storage backend
    async fn health_check(&self) -> anyhow::Result<()>;
}
