//! Object handlers
//!
//! Every handler answers HTTP 200 with the `{isSuccess, data, message}` envelope;
//! success or failure is carried in the body.

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use geomap_api::{ObjectRequest, Response};
use geomap_persistence::ObjectRecord;

use crate::model::AppState;

/// Bulk create. Registered ahead of `/{id}` so the literal segment wins.
#[utoipa::path(
    post,
    path = "/api/object/addrange",
    tag = "object",
    request_body = Vec<ObjectRequest>,
    responses(
        (status = 200, description = "Created objects", body = Response<Vec<ObjectRecord>>)
    )
)]
#[post("/addrange")]
pub async fn add_range(
    data: web::Data<AppState>,
    body: web::Json<Vec<ObjectRequest>>,
) -> impl Responder {
    let requests = body.into_inner();
    tracing::debug!(count = requests.len(), "Bulk create requested");
    HttpResponse::Ok().json(data.object_service.bulk_create(requests).await)
}

#[utoipa::path(
    get,
    path = "/api/object",
    tag = "object",
    responses(
        (status = 200, description = "Objects by id", body = Response<Vec<ObjectRecord>>)
    )
)]
#[get("")]
pub async fn list(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.object_service.list().await)
}

#[utoipa::path(
    get,
    path = "/api/object/{id}",
    tag = "object",
    params(("id" = i32, Path, description = "Object id")),
    responses(
        (status = 200, description = "Found object", body = Response<ObjectRecord>)
    )
)]
#[get("/{id}")]
pub async fn get_by_id(data: web::Data<AppState>, id: web::Path<i32>) -> impl Responder {
    HttpResponse::Ok().json(data.object_service.get(id.into_inner()).await)
}

#[utoipa::path(
    post,
    path = "/api/object",
    tag = "object",
    request_body = ObjectRequest,
    responses(
        (status = 200, description = "Created object", body = Response<ObjectRecord>)
    )
)]
#[post("")]
pub async fn create(
    data: web::Data<AppState>,
    body: web::Json<ObjectRequest>,
) -> impl Responder {
    HttpResponse::Ok().json(data.object_service.create(body.into_inner()).await)
}

#[utoipa::path(
    put,
    path = "/api/object/{id}",
    tag = "object",
    params(("id" = i32, Path, description = "Object id")),
    request_body = ObjectRequest,
    responses(
        (status = 200, description = "Updated object", body = Response<ObjectRecord>)
    )
)]
#[put("/{id}")]
pub async fn update(
    data: web::Data<AppState>,
    id: web::Path<i32>,
    body: web::Json<ObjectRequest>,
) -> impl Responder {
    HttpResponse::Ok().json(
        data.object_service
            .update(id.into_inner(), body.into_inner())
            .await,
    )
}

#[utoipa::path(
    delete,
    path = "/api/object/{id}",
    tag = "object",
    params(("id" = i32, Path, description = "Object id")),
    responses(
        (status = 200, description = "Deleted flag", body = Response<bool>)
    )
)]
#[delete("/{id}")]
pub async fn remove(data: web::Data<AppState>, id: web::Path<i32>) -> impl Responder {
    HttpResponse::Ok().json(data.object_service.delete(id.into_inner()).await)
}
