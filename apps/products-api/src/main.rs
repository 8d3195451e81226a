//! Products API - REST server

use axum_helpers::server::create_production_app;
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StorageConfig};
use state::Storage;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Using {} storage", config.storage.name());

    let storage = match config.storage.clone() {
        StorageConfig::Postgres(pg) => {
            let db =
                database::postgres::connect_from_config_with_retry(pg, RetryConfig::default())
                    .await?;
            Storage::Postgres(db)
        }
        StorageConfig::Memory => Storage::Memory,
    };

    api::products::init_schema(&storage).await?;

    let router = api::app(&config, &storage)?;

    info!("Starting Products API on port {}", config.server.port);

    create_production_app(
        router,
        &config.server,
        config.shutdown_timeout,
        storage.close(),
    )
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
