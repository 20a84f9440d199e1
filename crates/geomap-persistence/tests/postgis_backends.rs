//! Integration tests for the database backends
//!
//! These run against a real PostgreSQL + PostGIS instance given by
//! `TEST_DATABASE_URL` and are skipped when it is not set.

use geomap_geometry::{Coord, Geometry, parse};
use geomap_persistence::schema::ensure_schema;
use geomap_persistence::sea_orm::{Database, DatabaseConnection};
use geomap_persistence::{
    NewObject, ObjectPersistence, OrmObjectPersistService, PersistenceService,
    SqlObjectPersistService, StorageMode,
};

macro_rules! skip_if_no_db {
    () => {
        if std::env::var("TEST_DATABASE_URL").is_err() {
            eprintln!("Skipping test: TEST_DATABASE_URL not set");
            return;
        }
    };
}

async fn connect() -> DatabaseConnection {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL not set");
    let db = Database::connect(&url).await.expect("database connection failed");
    ensure_schema(&db).await.expect("schema bootstrap failed");
    db
}

fn point(x: f64, y: f64) -> Geometry {
    Geometry::Point(Coord::new(x, y))
}

async fn exercise(svc: &dyn PersistenceService, tag: &str) {
    svc.health_check().await.unwrap();

    // create + read back
    let polygon = parse("POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 2 1, 2 2, 1 1))").unwrap();
    let created = svc
        .object_insert(NewObject::new(format!("{tag}-poly"), polygon.clone()))
        .await
        .unwrap();
    let fetched = svc.object_get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, format!("{tag}-poly"));
    assert!(fetched.geometry.approx_eq(&polygon, 1e-9));

    let precise = point(-73.98571234567, 40.74844205);
    let created_point = svc
        .object_insert(NewObject::new(format!("{tag}-pt"), precise.clone()))
        .await
        .unwrap();
    let fetched_point = svc.object_get_by_id(created_point.id).await.unwrap().unwrap();
    assert_eq!(fetched_point.geometry, precise);

    // list is ordered by id and contains what we wrote
    let all = svc.object_find_all().await.unwrap();
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    assert!(all.iter().any(|r| r.id == created.id));

    // update
    let line = Geometry::LineString(vec![Coord::new(30.0, 10.0), Coord::new(10.0, 30.0)]);
    let updated = svc
        .object_update(created.id, NewObject::new(format!("{tag}-line"), line.clone()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(
        svc.object_get_by_id(created.id).await.unwrap().unwrap().geometry,
        line
    );
    assert!(
        svc.object_update(i32::MAX, NewObject::new("missing", point(0.0, 0.0)))
            .await
            .unwrap()
            .is_none()
    );

    // batch is all or nothing: the second name exceeds varchar(40)
    let before = svc.object_find_all().await.unwrap().len();
    let result = svc
        .object_insert_batch(vec![
            NewObject::new(format!("{tag}-ok"), point(1.0, 1.0)),
            NewObject::new("x".repeat(41), point(2.0, 2.0)),
        ])
        .await;
    assert!(result.is_err());
    assert_eq!(svc.object_find_all().await.unwrap().len(), before);

    let batch = svc
        .object_insert_batch(vec![
            NewObject::new(format!("{tag}-b1"), point(1.0, 1.0)),
            NewObject::new(format!("{tag}-b2"), point(2.0, 2.0)),
        ])
        .await
        .unwrap();
    assert_ne!(batch[0].id, batch[1].id);

    // delete, then delete again
    for id in [created.id, created_point.id, batch[0].id, batch[1].id] {
        assert!(svc.object_delete(id).await.unwrap());
        assert!(!svc.object_delete(id).await.unwrap());
    }
    assert!(svc.object_get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_backends_against_postgis() {
    skip_if_no_db!();
    // `DatabaseConnection` is not `Clone` when sea-orm's `mock` feature is on
    // (enabled by dev-dependencies), so each backend gets its own connection
    let sql = SqlObjectPersistService::new(connect().await);
    assert_eq!(sql.storage_mode(), StorageMode::Sql);
    exercise(&sql, "sql").await;

    let orm = OrmObjectPersistService::new(connect().await);
    assert_eq!(orm.storage_mode(), StorageMode::Orm);
    exercise(&orm, "orm").await;
}
