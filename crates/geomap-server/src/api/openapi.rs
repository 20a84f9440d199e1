//! OpenAPI documentation for the object API

use geomap_api::ObjectRequest;
use geomap_persistence::ObjectRecord;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geomap API",
        description = "CRUD service for geometric map objects exchanged as WKT",
        license(name = "Apache-2.0", url = "https://www.apache.org/licenses/LICENSE-2.0")
    ),
    tags(
        (name = "object", description = "Map objects: points, lines and polygons")
    ),
    paths(
        crate::api::object::add_range,
        crate::api::object::list,
        crate::api::object::get_by_id,
        crate::api::object::create,
        crate::api::object::update,
        crate::api::object::remove,
    ),
    components(schemas(ObjectRequest, ObjectRecord))
)]
pub struct ApiDoc;

/// Mounts Swagger UI at `/swagger-ui/` with the document at `/api-docs/openapi.json`
#[cfg(feature = "swagger")]
pub fn configure_swagger(cfg: &mut actix_web::web::ServiceConfig) {
    use utoipa_swagger_ui::SwaggerUi;

    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}

/// No-op when the swagger feature is disabled
#[cfg(not(feature = "swagger"))]
pub fn configure_swagger(_cfg: &mut actix_web::web::ServiceConfig) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_object_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        let collection = paths.get("/api/object").expect("collection path");
        assert!(collection.get.is_some());
        assert!(collection.post.is_some());

        let item = paths.get("/api/object/{id}").expect("item path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());

        let bulk = paths.get("/api/object/addrange").expect("bulk path");
        assert!(bulk.post.is_some());
    }

    #[test]
    fn test_wire_schemas_are_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.expect("components").schemas;

        assert!(schemas.contains_key("ObjectRequest"));
        assert!(schemas.contains_key("ObjectRecord"));
    }

    #[test]
    fn test_document_serializes_with_examples() {
        let json = ApiDoc::openapi().to_json().expect("openapi json");

        assert!(json.contains("\"wkt\""));
        assert!(json.contains("POINT (30 10)"));
    }

    #[cfg(feature = "swagger")]
    #[actix_web::test]
    async fn test_openapi_document_is_served() {
        use actix_web::{App, test};

        let app = test::init_service(App::new().configure(configure_swagger)).await;
        let req = test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["info"]["title"], "Geomap API");
        assert!(body["paths"]["/api/object/{id}"]["put"].is_object());
    }
}
