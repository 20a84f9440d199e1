//! Object service facade
//!
//! Every operation runs validate, then parse, then store, and always answers
//! with a [`Response`] envelope. Internal failures never leak: store errors are
//! logged with their detail and reported as a generic message.

use std::sync::Arc;

use geomap_api::{ObjectRequest, Response, validate_batch, validate_object};
use geomap_common::{
    GeomapError, MSG_CREATED, MSG_DELETED, MSG_FOUND, MSG_LISTED, MSG_UPDATED,
};
use geomap_geometry::Geometry;
use geomap_persistence::{NewObject, ObjectRecord, PersistenceService, StorageMode};
use tracing::{debug, error, info};

type ServiceResult<T> = Result<T, GeomapError>;

/// Orchestrates validation, geometry parsing and persistence for map objects
#[derive(Clone)]
pub struct ObjectService {
    persistence: Arc<dyn PersistenceService>,
}

impl ObjectService {
    pub fn new(persistence: Arc<dyn PersistenceService>) -> Self {
        Self { persistence }
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.persistence.storage_mode()
    }

    /// Verify the backend is reachable
    pub async fn health_check(&self) -> anyhow::Result<()> {
        self.persistence.health_check().await
    }

    pub async fn list(&self) -> Response<Vec<ObjectRecord>> {
        let result = self
            .persistence
            .object_find_all()
            .await
            .map_err(GeomapError::store);
        respond("list", result, MSG_LISTED)
    }

    pub async fn get(&self, id: i32) -> Response<ObjectRecord> {
        respond("get", self.find(id).await, MSG_FOUND)
    }

    pub async fn create(&self, request: ObjectRequest) -> Response<ObjectRecord> {
        respond("create", self.try_create(request).await, MSG_CREATED)
    }

    pub async fn bulk_create(&self, requests: Vec<ObjectRequest>) -> Response<Vec<ObjectRecord>> {
        respond("bulk_create", self.try_bulk_create(requests).await, MSG_CREATED)
    }

    pub async fn update(&self, id: i32, request: ObjectRequest) -> Response<ObjectRecord> {
        respond("update", self.try_update(id, request).await, MSG_UPDATED)
    }

    pub async fn delete(&self, id: i32) -> Response<bool> {
        respond("delete", self.try_delete(id).await, MSG_DELETED)
    }

    async fn find(&self, id: i32) -> ServiceResult<ObjectRecord> {
        self.persistence
            .object_get_by_id(id)
            .await
            .map_err(GeomapError::store)?
            .ok_or(GeomapError::NotFound)
    }

    async fn try_create(&self, request: ObjectRequest) -> ServiceResult<ObjectRecord> {
        let object = to_new_object(request)?;
        self.persistence
            .object_insert(object)
            .await
            .map_err(GeomapError::store)
    }

    async fn try_bulk_create(
        &self,
        requests: Vec<ObjectRequest>,
    ) -> ServiceResult<Vec<ObjectRecord>> {
        let errors = validate_batch(&requests);
        if !errors.is_empty() {
            return Err(GeomapError::Validation(errors));
        }

        let objects = requests
            .into_iter()
            .enumerate()
            .map(|(i, request)| {
                let geometry = parse_geometry(request.wkt())
                    .map_err(|e| prefix_item(i, e))?;
                Ok(NewObject::new(request.name(), geometry))
            })
            .collect::<ServiceResult<Vec<_>>>()?;

        if objects.is_empty() {
            return Ok(Vec::new());
        }

        self.persistence
            .object_insert_batch(objects)
            .await
            .map_err(GeomapError::store)
    }

    async fn try_update(&self, id: i32, request: ObjectRequest) -> ServiceResult<ObjectRecord> {
        let errors = validate_object(&request);
        if !errors.is_empty() {
            return Err(GeomapError::Validation(errors));
        }
        self.find(id).await?;

        let geometry = parse_geometry(request.wkt())?;
        self.persistence
            .object_update(id, NewObject::new(request.name(), geometry))
            .await
            .map_err(GeomapError::store)?
            // Deleted between the lookup and the write
            .ok_or(GeomapError::NotFound)
    }

    async fn try_delete(&self, id: i32) -> ServiceResult<bool> {
        self.find(id).await?;
        let deleted = self
            .persistence
            .object_delete(id)
            .await
            .map_err(GeomapError::store)?;
        if deleted {
            Ok(true)
        } else {
            Err(GeomapError::NotFound)
        }
    }
}

fn to_new_object(request: ObjectRequest) -> ServiceResult<NewObject> {
    let errors = validate_object(&request);
    if !errors.is_empty() {
        return Err(GeomapError::Validation(errors));
    }
    let geometry = parse_geometry(request.wkt())?;
    Ok(NewObject::new(request.name(), geometry))
}

fn parse_geometry(wkt: &str) -> ServiceResult<Geometry> {
    geomap_geometry::parse(wkt).map_err(|e| GeomapError::MalformedGeometry(e.to_string()))
}

fn prefix_item(index: usize, err: GeomapError) -> GeomapError {
    match err {
        GeomapError::MalformedGeometry(detail) => {
            GeomapError::MalformedGeometry(format!("item {}: {}", index, detail))
        }
        other => other,
    }
}

/// Turn an operation outcome into an envelope, logging failures
fn respond<T>(operation: &'static str, result: ServiceResult<T>, message: &str) -> Response<T> {
    match result {
        Ok(data) => Response::success(data, message),
        Err(err) => {
            match &err {
                GeomapError::StoreFailure(detail) => {
                    error!(operation, detail = %detail, "Store operation failed");
                }
                GeomapError::NotFound => {
                    info!(operation, "Object not found");
                }
                other => {
                    debug!(operation, kind = other.kind(), error = %other, "Request rejected");
                }
            }
            Response::fail(err.to_string())
        }
    }
}
