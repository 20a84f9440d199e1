// In-memory persistence backend
// Holds the object table inside the process; used for local development and tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::model::{NewObject, ObjectRecord, StorageMode};
use crate::traits::{ObjectPersistence, PersistenceService};

#[derive(Debug)]
struct MemoryTable {
    next_id: i32,
    rows: BTreeMap<i32, ObjectRecord>,
}

impl MemoryTable {
    fn allocate_id(&mut self) -> anyhow::Result<i32> {
        let id = self.next_id;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("object id space exhausted"))?;
        Ok(id)
    }
}

/// Process-owned object table
///
/// Ids start at 1 and are never reused. Every operation takes the lock once, so
/// a batch insert is observed either completely or not at all.
pub struct MemoryPersistService {
    table: RwLock<MemoryTable>,
}

impl MemoryPersistService {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(MemoryTable {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryPersistService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersistenceService for MemoryPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::Memory
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl ObjectPersistence for MemoryPersistService {
    async fn object_find_all(&self) -> anyhow::Result<Vec<ObjectRecord>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn object_get_by_id(&self, id: i32) -> anyhow::Result<Option<ObjectRecord>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn object_insert(&self, object: NewObject) -> anyhow::Result<ObjectRecord> {
        let mut table = self.table.write();
        let record = object.into_record(table.allocate_id()?);
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn object_insert_batch(
        &self,
        objects: Vec<NewObject>,
    ) -> anyhow::Result<Vec<ObjectRecord>> {
        let mut table = self.table.write();
        let first_id = table.next_id;
        let records = objects
            .into_iter()
            .map(|object| Ok(object.into_record(table.allocate_id()?)))
            .collect::<anyhow::Result<Vec<_>>>();

        match records {
            Ok(records) => {
                for record in &records {
                    table.rows.insert(record.id, record.clone());
                }
                Ok(records)
            }
            Err(e) => {
                table.next_id = first_id;
                Err(e)
            }
        }
    }

    async fn object_update(
        &self,
        id: i32,
        object: NewObject,
    ) -> anyhow::Result<Option<ObjectRecord>> {
        let mut table = self.table.write();
        Ok(table.rows.get_mut(&id).map(|row| {
            *row = object.into_record(id);
            row.clone()
        }))
    }

    async fn object_delete(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.table.write().rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use geomap_geometry::{Coord, Geometry};

    use super::*;

    fn point(x: f64, y: f64) -> Geometry {
        Geometry::Point(Coord::new(x, y))
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let svc = MemoryPersistService::new();
        let a = svc.object_insert(NewObject::new("A", point(30.0, 10.0))).await.unwrap();
        let b = svc.object_insert(NewObject::new("B", point(1.0, 2.0))).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let all = svc.object_find_all().await.unwrap();
        assert_eq!(all, vec![a.clone(), b]);
        assert_eq!(svc.object_get_by_id(1).await.unwrap(), Some(a));
        assert_eq!(svc.object_get_by_id(9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_batch_assigns_distinct_ids() {
        let svc = MemoryPersistService::new();
        let records = svc
            .object_insert_batch(vec![
                NewObject::new("A", point(1.0, 1.0)),
                NewObject::new("B", point(2.0, 2.0)),
            ])
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
        assert_eq!(svc.len(), 2);

        assert!(svc.object_insert_batch(Vec::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_batch_leaves_table_untouched() {
        // Room for exactly one more id
        let svc = MemoryPersistService {
            table: RwLock::new(MemoryTable {
                next_id: i32::MAX - 1,
                rows: BTreeMap::new(),
            }),
        };

        let result = svc
            .object_insert_batch(vec![
                NewObject::new("A", point(1.0, 1.0)),
                NewObject::new("B", point(2.0, 2.0)),
            ])
            .await;
        assert!(result.is_err());
        assert!(svc.is_empty());

        // The id handed out inside the failed batch is available again
        let record = svc.object_insert(NewObject::new("C", point(3.0, 3.0))).await.unwrap();
        assert_eq!(record.id, i32::MAX - 1);
        assert_eq!(svc.len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let svc = MemoryPersistService::new();
        let a = svc.object_insert(NewObject::new("A", point(0.0, 0.0))).await.unwrap();
        let updated = svc
            .object_update(a.id, NewObject::new("A2", point(5.0, 5.0)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.name, "A2");
        assert_eq!(
            svc.object_get_by_id(a.id).await.unwrap().unwrap().geometry,
            point(5.0, 5.0)
        );
        assert!(
            svc.object_update(9999, NewObject::new("X", point(0.0, 0.0)))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_on_miss() {
        let svc = MemoryPersistService::new();
        let a = svc.object_insert(NewObject::new("A", point(0.0, 0.0))).await.unwrap();
        assert!(svc.object_delete(a.id).await.unwrap());
        assert!(!svc.object_delete(a.id).await.unwrap());
        assert!(!svc.object_delete(a.id).await.unwrap());
        assert!(svc.is_empty());

        // Ids are not reused after delete
        let b = svc.object_insert(NewObject::new("B", point(0.0, 0.0))).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_storage_mode_and_health() {
        let svc = MemoryPersistService::new();
        assert_eq!(svc.storage_mode(), StorageMode::Memory);
        assert!(svc.health_check().await.is_ok());
    }
}
