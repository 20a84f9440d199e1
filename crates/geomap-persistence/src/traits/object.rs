//! Object persistence trait
//!
//! Absence is reported as `None` / `false`; `Err` always means the store failed.

use async_trait::async_trait;

use crate::model::{NewObject, ObjectRecord};

/// Map object persistence operations
#[async_trait]
pub trait ObjectPersistence: Send + Sync {
    /// Find all objects, ordered by id
    async fn object_find_all(&self) -> anyhow::Result<Vec<ObjectRecord>>;

    /// Get an object by its id
    async fn object_get_by_id(&self, id: i32) -> anyhow::Result<Option<ObjectRecord>>;

    /// Insert one object and return it with its assigned id
    async fn object_insert(&self, object: NewObject) -> anyhow::Result<ObjectRecord>;

    /// Insert every object or none of them
    async fn object_insert_batch(
        &self,
        objects: Vec<NewObject>,
    ) -> anyhow::Result<Vec<ObjectRecord>>;

    /// Replace name and geometry of an existing object
    async fn object_update(
        &self,
        id: i32,
        object: NewObject,
    ) -> anyhow::Result<Option<ObjectRecord>>;

    /// Delete an object
    async fn object_delete(&self, id: i32) -> anyhow::Result<bool>;
}
