//! ORM persistence backend (PostgreSQL + PostGIS via SeaORM entities)
//!
//! The geometry column is mapped through [`SpatialValue`], so every read and
//! write goes through the entity layer without hand-written SQL.

use async_trait::async_trait;
use sea_orm::{prelude::Expr, *};

use crate::entity::objects;
use crate::entity::spatial::SpatialValue;
use crate::model::*;
use crate::traits::*;

/// SeaORM entity persistence service
pub struct OrmObjectPersistService {
    db: DatabaseConnection,
}

impl OrmObjectPersistService {
    /// Create a new OrmObjectPersistService with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn active_model(object: &NewObject) -> objects::ActiveModel {
        objects::ActiveModel {
            name: Set(object.name.clone()),
            geometry: Set(SpatialValue(object.geometry.clone())),
            ..Default::default()
        }
    }

    async fn insert_one<C: ConnectionTrait>(
        conn: &C,
        object: &NewObject,
    ) -> anyhow::Result<i32> {
        let result = objects::Entity::insert(Self::active_model(object))
            .exec(conn)
            .await?;
        Ok(result.last_insert_id)
    }
}

#[async_trait]
impl PersistenceService for OrmObjectPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::Orm
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        objects::Entity::find()
            .select_only()
            .column_as(Expr::cust("1"), "health")
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectPersistence for OrmObjectPersistService {
    async fn object_find_all(&self) -> anyhow::Result<Vec<ObjectRecord>> {
        let models = objects::Entity::find()
            .order_by_asc(objects::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ObjectRecord::from).collect())
    }

    async fn object_get_by_id(&self, id: i32) -> anyhow::Result<Option<ObjectRecord>> {
        let model = objects::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(ObjectRecord::from))
    }

    async fn object_insert(&self, object: NewObject) -> anyhow::Result<ObjectRecord> {
        let id = Self::insert_one(&self.db, &object).await?;
        Ok(object.into_record(id))
    }

    async fn object_insert_batch(
        &self,
        objects: Vec<NewObject>,
    ) -> anyhow::Result<Vec<ObjectRecord>> {
        // Ids must come back per row, so rows are inserted one by one inside the transaction
        let tx = self.db.begin().await?;
        let mut ids = Vec::with_capacity(objects.len());
        for object in &objects {
            ids.push(Self::insert_one(&tx, object).await?);
        }
        tx.commit().await?;

        Ok(objects
            .into_iter()
            .zip(ids)
            .map(|(object, id)| object.into_record(id))
            .collect())
    }

    async fn object_update(
        &self,
        id: i32,
        object: NewObject,
    ) -> anyhow::Result<Option<ObjectRecord>> {
        let result = objects::Entity::update_many()
            .set(Self::active_model(&object))
            .filter(objects::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(object.into_record(id)))
    }

    async fn object_delete(&self, id: i32) -> anyhow::Result<bool> {
        let result = objects::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use geomap_geometry::{Coord, Geometry};
    use sea_orm::sea_query::Value;

    use super::*;

    const POINT_30_10_EWKB: &str = "0101000020E61000000000000000003E400000000000002440";

    fn row(id: i32, name: &str, geometry: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", Value::from(id)),
            ("name", Value::from(name.to_string())),
            ("geometry", Value::from(geometry.to_string())),
        ])
    }

    fn executed_sql(log: &[Transaction]) -> Vec<String> {
        log.iter()
            .flat_map(|t| t.statements())
            .map(|stmt| stmt.sql.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_find_decodes_ewkb_column() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "A", POINT_30_10_EWKB)]])
            .append_query_results([vec![row(1, "A", POINT_30_10_EWKB)]])
            .into_connection();
        let svc = OrmObjectPersistService::new(db);

        let all = svc.object_find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].geometry, Geometry::Point(Coord::new(30.0, 10.0)));

        let one = svc.object_get_by_id(1).await.unwrap().unwrap();
        assert_eq!(one.name, "A");
    }

    #[tokio::test]
    async fn test_undecodable_column_is_an_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "A", "CIRCLE (0 0 5)")]])
            .into_connection();
        let svc = OrmObjectPersistService::new(db);
        assert!(svc.object_find_all().await.is_err());
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("id", Value::from(42))])]])
            .into_connection();
        let svc = OrmObjectPersistService::new(db);

        let record = svc
            .object_insert(NewObject::new(
                "Road",
                Geometry::LineString(vec![Coord::new(30.0, 10.0), Coord::new(10.0, 30.0)]),
            ))
            .await
            .unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.name, "Road");
    }

    #[tokio::test]
    async fn test_insert_batch_failure_is_not_committed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("id", Value::from(1))])]])
            .append_query_errors([DbErr::Custom("value too long".to_string())])
            .into_connection();
        let svc = OrmObjectPersistService::new(db);

        let point = Geometry::Point(Coord::new(1.0, 1.0));
        let result = svc
            .object_insert_batch(vec![
                NewObject::new("A", point.clone()),
                NewObject::new("B", point),
            ])
            .await;
        assert!(result.is_err());

        let sql = executed_sql(&svc.db.into_transaction_log());
        assert!(sql.iter().any(|s| s == "BEGIN"));
        assert!(!sql.iter().any(|s| s == "COMMIT"));
        assert!(sql.iter().any(|s| s == "ROLLBACK"));
    }

    #[tokio::test]
    async fn test_delete_miss_is_false() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let svc = OrmObjectPersistService::new(db);
        assert!(!svc.object_delete(9999).await.unwrap());
    }
}
