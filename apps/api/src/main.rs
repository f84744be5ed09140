//! OMBARO API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use ombaro_core::AppError;
use ombaro_domain::AccessCatalog;
use ombaro_infrastructure::load_access_catalog;
use tower_sessions::{SessionManagerLayer, SessionStore};
use tracing::info;

use crate::api_config::{ApiConfig, DataBackend, init_tracing};
use crate::api_services::{
    Repositories, build_app_state, build_memory_session_layer, build_postgres_session_layer,
    connect_and_migrate,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    if config.migrate_only {
        connect_and_migrate(config.database_url()?).await?;
        info!("database migrations applied successfully");
        return Ok(());
    }

    let catalog = Arc::new(load_access_catalog(config.access_catalog_path.as_deref())?);

    match config.data_backend {
        DataBackend::Postgres => {
            let pool = connect_and_migrate(config.database_url()?).await?;
            let session_layer =
                build_postgres_session_layer(pool.clone(), config.cookie_secure).await?;
            serve(&config, catalog, Repositories::postgres(pool), session_layer).await
        }
        DataBackend::Memory => {
            info!("using in-memory repositories, data is lost on restart");
            let session_layer = build_memory_session_layer(config.cookie_secure);
            serve(&config, catalog, Repositories::in_memory(), session_layer).await
        }
    }
}

async fn serve<Store>(
    config: &ApiConfig,
    catalog: Arc<AccessCatalog>,
    repositories: Repositories,
    session_layer: SessionManagerLayer<Store>,
) -> Result<(), AppError>
where
    Store: SessionStore + Clone,
{
    if config.dev_seed {
        dev_seed::run(&catalog, &repositories).await?;
    }

    let app_state = build_app_state(catalog, repositories, config);
    let app = api_router::build_router(app_state, session_layer)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "ombaro-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
