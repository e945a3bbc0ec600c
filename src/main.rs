//! salescast - Nigeria retail sales forecasting web module
//!
//! Zero-config startup: resolves a root folder, opens (or creates) the
//! history database, loads reference artifacts with compiled-in fallbacks,
//! and serves the forecast form over HTTP. The trained model itself is not
//! loaded until the first forecast request needs it.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use salescast::config::{CliArgs, Config};
use salescast::encoders::EncoderSet;
use salescast::forecast::Forecaster;
use salescast::model::ModelHandle;
use salescast::stores::StoreDirectory;
use salescast::{build_router, db, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting salescast v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = CliArgs::parse();
    let config = Config::resolve(args);
    config.ensure_root_folder()?;
    info!("Root folder: {}", config.root_folder.display());

    let pool = db::init_database(&config.database_path).await?;

    // Reference artifacts are loaded eagerly (they are small); the model
    // waits for the first forecast
    let stores = Arc::new(StoreDirectory::load_or_default(&config.stores_path())?);
    let encoders = Arc::new(EncoderSet::load_or_default(&config.encoders_path())?);
    let model = Arc::new(ModelHandle::from_artifact(config.model_path()));

    let forecaster = Forecaster::new(stores, encoders, model, pool.clone());
    let state = AppState::new(pool, forecaster);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("salescast listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
