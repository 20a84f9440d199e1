//! Schema bootstrap
//!
//! Creates the PostGIS extension and the `objects` table when they are missing.
//! Nothing is ever altered or dropped.

use sea_orm::{ConnectionTrait, DatabaseConnection};

const CREATE_EXTENSION: &str = "CREATE EXTENSION IF NOT EXISTS postgis";

const CREATE_OBJECTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS objects (
    id integer GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
    name varchar(40) NOT NULL,
    geometry geometry(Geometry, 4326) NOT NULL
)";

/// Ensure the PostGIS extension and the objects table exist
pub async fn ensure_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    for statement in [CREATE_EXTENSION, CREATE_OBJECTS_TABLE] {
        db.execute_unprepared(statement).await?;
    }
    tracing::info!(table = geomap_common::OBJECTS_TABLE, "Schema is ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Statement, Transaction};

    use super::*;

    #[tokio::test]
    async fn test_ensure_schema_runs_both_statements() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        ensure_schema(&db).await.unwrap();

        assert_eq!(
            db.into_transaction_log(),
            vec![
                Transaction::one(Statement::from_string(
                    DatabaseBackend::Postgres,
                    CREATE_EXTENSION
                )),
                Transaction::one(Statement::from_string(
                    DatabaseBackend::Postgres,
                    CREATE_OBJECTS_TABLE
                )),
            ]
        );
    }
}
