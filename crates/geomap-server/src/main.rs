use std::sync::Arc;

use anyhow::Context;
use geomap_server::{
    AppState, Configuration,
    startup::{self, create_persistence},
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let configuration = Configuration::new()?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    let persistence = create_persistence(&configuration).await?;

    let address = configuration.server_address();
    let port = configuration.server_port();
    let context_path = configuration.server_context_path();
    let allowed_origin = configuration.cors_allowed_origin();

    let app_state = Arc::new(AppState::new(configuration, persistence));
    app_state
        .object_service
        .health_check()
        .await
        .context("Storage health check failed")?;

    tracing::info!(
        address = %address,
        port = port,
        context_path = %context_path,
        allowed_origin = %allowed_origin,
        storage_mode = %app_state.object_service.storage_mode(),
        "Starting geomap server"
    );

    startup::main_server(app_state, allowed_origin, context_path, address, port)?.await?;

    Ok(())
}
