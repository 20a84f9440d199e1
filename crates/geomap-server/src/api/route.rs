use actix_web::{HttpResponse, Scope, error::InternalError, web};
use geomap_api::Response;
use geomap_common::GeomapError;

pub fn routes() -> Scope {
    web::scope("/object")
        .service(super::object::add_range)
        .service(super::object::list)
        .service(super::object::create)
        .service(super::object::get_by_id)
        .service(super::object::update)
        .service(super::object::remove)
}

/// Mount the object routes under `context_path`.
///
/// Bodies that are not valid JSON and ids that are not integers are answered
/// with a failure envelope instead of actix's plain-text errors.
pub fn configure(context_path: &str, cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = Response::<()>::fail(GeomapError::InvalidRequest(err.to_string()).to_string());
        InternalError::from_response(err, HttpResponse::Ok().json(body)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let body = Response::<()>::fail(GeomapError::InvalidRequest(err.to_string()).to_string());
        InternalError::from_response(err, HttpResponse::Ok().json(body)).into()
    }))
    .service(web::scope(context_path).service(routes()));
}
