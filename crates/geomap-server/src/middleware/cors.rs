//! Cross-origin policy for the map editor

use actix_cors::Cors;

const ANY_ORIGIN: &str = "*";
const MAX_AGE_SECONDS: usize = 3600;

/// Build the CORS middleware for `allowed_origin`, or every origin with `*`.
///
/// Any method and header is allowed; preflight requests are answered here and
/// never reach a handler.
pub fn cors(allowed_origin: &str) -> Cors {
    let allowed_origin = allowed_origin.trim();
    let cors = if allowed_origin == ANY_ORIGIN {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(allowed_origin)
    };
    cors.allow_any_method()
        .allow_any_header()
        .max_age(MAX_AGE_SECONDS)
}

#[cfg(test)]
mod tests {
    use actix_web::{
        App, HttpResponse,
        http::{Method, header},
        test, web,
    };

    use super::*;

    const ORIGIN: &str = "http://localhost:5173";

    async fn hello() -> HttpResponse {
        HttpResponse::Ok().body("hello")
    }

    #[actix_web::test]
    async fn test_preflight_is_answered_without_reaching_handler() {
        let app = test::init_service(
            App::new()
                .wrap(cors(ORIGIN))
                .route("/object", web::post().to(hello)),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/object")
            .insert_header((header::ORIGIN, ORIGIN))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let headers = resp.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), ORIGIN);
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn test_simple_request_gets_origin_header() {
        let app = test::init_service(
            App::new()
                .wrap(cors(ORIGIN))
                .route("/object", web::get().to(hello)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/object")
            .insert_header((header::ORIGIN, ORIGIN))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            ORIGIN
        );
    }

    #[actix_web::test]
    async fn test_foreign_origin_gets_no_allow_header() {
        let app = test::init_service(
            App::new()
                .wrap(cors(ORIGIN))
                .route("/object", web::get().to(hello)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/object")
            .insert_header((header::ORIGIN, "http://evil.example"))
            .to_request();
        let resp = test::try_call_service(&app, req).await;
        let allowed = resp
            .ok()
            .and_then(|r| r.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).cloned());
        assert!(allowed.is_none());
    }

    #[actix_web::test]
    async fn test_wildcard_allows_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(cors("*"))
                .route("/object", web::get().to(hello)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/object")
            .insert_header((header::ORIGIN, "http://anywhere.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert!(
            resp.headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }
}
