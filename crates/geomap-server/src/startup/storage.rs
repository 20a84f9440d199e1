//! Storage backend selection.

use std::sync::Arc;

use anyhow::Context;
use geomap_persistence::{
    MemoryPersistService, OrmObjectPersistService, PersistenceService, SqlObjectPersistService,
    StorageMode, schema,
};

use crate::model::Configuration;

/// Build the persistence backend named by `geomap.storage.mode`.
///
/// Database modes open the connection pool and, when `db.autoCreateSchema` is
/// set, create the PostGIS extension and the objects table first.
pub async fn create_persistence(
    configuration: &Configuration,
) -> anyhow::Result<Arc<dyn PersistenceService>> {
    let mode = configuration.storage_mode()?;
    tracing::info!(storage_mode = %mode, "Initializing storage backend");

    if !mode.requires_database() {
        tracing::warn!("Using in-memory storage, objects are lost on restart");
        return Ok(Arc::new(MemoryPersistService::new()));
    }

    let db = configuration
        .database_connection()
        .await
        .context("Failed to connect to database")?;

    if configuration.auto_create_schema() {
        schema::ensure_schema(&db)
            .await
            .context("Failed to create database schema")?;
    }

    let persistence: Arc<dyn PersistenceService> = match mode {
        StorageMode::Sql => Arc::new(SqlObjectPersistService::new(db)),
        StorageMode::Orm => Arc::new(OrmObjectPersistService::new(db)),
        StorageMode::Memory => Arc::new(MemoryPersistService::new()),
    };
    Ok(persistence)
}
