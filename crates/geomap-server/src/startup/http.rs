//! HTTP server setup.

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger};

use crate::{
    api::{openapi, route},
    middleware::cors::cors,
    model::AppState,
};

/// Creates and binds the object API server.
///
/// Routes live under `/{context_path}/object`. Requests from `allowed_origin`
/// are allowed cross-origin.
pub fn main_server(
    app_state: Arc<AppState>,
    allowed_origin: String,
    context_path: String,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&allowed_origin))
            .app_data(actix_web::web::Data::from(app_state.clone()))
            .configure(|cfg| route::configure(&context_path, cfg))
            .configure(openapi::configure_swagger)
    })
    .bind((address, port))?
    .run())
}
