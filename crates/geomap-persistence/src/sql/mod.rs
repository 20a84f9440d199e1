//! SQL-based persistence backend (PostgreSQL + PostGIS via SeaORM statements)
//!
//! Every statement is parameterized. Geometries go in as WKT through
//! `ST_GeomFromText` and come back out through `ST_AsText`.

use async_trait::async_trait;
use geomap_common::STORAGE_SRID;
use geomap_geometry::{parse_spatial_text, write};
use sea_orm::*;

use crate::model::*;
use crate::traits::*;

const SELECT_ALL: &str = "SELECT id, name, ST_AsText(geometry) AS wkt FROM objects ORDER BY id";

const SELECT_BY_ID: &str = "SELECT id, name, ST_AsText(geometry) AS wkt FROM objects WHERE id = $1";

const INSERT: &str =
    "INSERT INTO objects (name, geometry) VALUES ($1, ST_GeomFromText($2, $3)) RETURNING id";

const UPDATE: &str =
    "UPDATE objects SET name = $1, geometry = ST_GeomFromText($2, $3) WHERE id = $4";

const DELETE: &str = "DELETE FROM objects WHERE id = $1";

/// Row shape produced by the select statements
#[derive(Debug, FromQueryResult)]
struct ObjectRow {
    id: i32,
    name: String,
    wkt: String,
}

impl TryFrom<ObjectRow> for ObjectRecord {
    type Error = anyhow::Error;

    fn try_from(row: ObjectRow) -> Result<Self, Self::Error> {
        let geometry = parse_spatial_text(&row.wkt)
            .map_err(|e| anyhow::anyhow!("object {} has unreadable geometry: {}", row.id, e))?;
        Ok(ObjectRecord {
            id: row.id,
            name: row.name,
            geometry,
        })
    }
}

/// Parameterized SQL persistence service
///
/// Wraps a SeaORM `DatabaseConnection` and issues hand-written statements.
pub struct SqlObjectPersistService {
    db: DatabaseConnection,
}

impl SqlObjectPersistService {
    /// Create a new SqlObjectPersistService with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn insert_one<C: ConnectionTrait>(
        conn: &C,
        object: &NewObject,
    ) -> anyhow::Result<i32> {
        let stmt = Statement::from_sql_and_values(
            conn.get_database_backend(),
            INSERT,
            [
                object.name.clone().into(),
                write(&object.geometry).into(),
                STORAGE_SRID.into(),
            ],
        );
        let row = conn
            .query_one(stmt)
            .await?
            .ok_or_else(|| anyhow::anyhow!("insert into objects returned no id"))?;
        Ok(row.try_get::<i32>("", "id")?)
    }
}

#[async_trait]
impl PersistenceService for SqlObjectPersistService {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::Sql
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.db
            .query_one(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1 AS health",
            ))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectPersistence for SqlObjectPersistService {
    async fn object_find_all(&self) -> anyhow::Result<Vec<ObjectRecord>> {
        let rows = ObjectRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            SELECT_ALL,
        ))
        .all(&self.db)
        .await?;

        rows.into_iter().map(ObjectRecord::try_from).collect()
    }

    async fn object_get_by_id(&self, id: i32) -> anyhow::Result<Option<ObjectRecord>> {
        let row = ObjectRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            SELECT_BY_ID,
            [id.into()],
        ))
        .one(&self.db)
        .await?;

        row.map(ObjectRecord::try_from).transpose()
    }

    async fn object_insert(&self, object: NewObject) -> anyhow::Result<ObjectRecord> {
        let id = Self::insert_one(&self.db, &object).await?;
        Ok(object.into_record(id))
    }

    async fn object_insert_batch(
        &self,
        objects: Vec<NewObject>,
    ) -> anyhow::Result<Vec<ObjectRecord>> {
        // Dropping the transaction on an early return rolls it back
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
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                UPDATE,
                [
                    object.name.clone().into(),
                    write(&object.geometry).into(),
                    STORAGE_SRID.into(),
                    id.into(),
                ],
            ))
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(object.into_record(id)))
    }

    async fn object_delete(&self, id: i32) -> anyhow::Result<bool> {
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                DELETE,
                [id.into()],
            ))
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
