//! Movement and location service - Main Application Entry Point
//!
//! Serves the movement handler (`/movements`) and the location handler
//! (`/locations`) over HTTP.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the store handles (PostgreSQL pool + migrations, or in-memory)
//! 3. Build the HTTP router, injecting each handler's store
//! 4. Start server on configured port

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use flatout_server::{
    app,
    config::{Config, StoreBackend},
    db,
    store::{
        SharedLocationStore, SharedMovementStore,
        memory::{MemoryLocationStore, MemoryMovementStore},
        postgres::{PgLocationStore, PgMovementStore},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(backend = ?config.store_backend, "Configuration loaded");

    let (movements, locations) = build_stores(&config).await?;

    let app = app(movements, locations);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Construct the store handles once; every request shares them.
async fn build_stores(
    config: &Config,
) -> anyhow::Result<(SharedMovementStore, SharedLocationStore)> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let pool =
                db::create_pool(config.require_database_url()?, config.database_max_connections)
                    .await?;
            tracing::info!("Database pool created");

            db::run_migrations(&pool).await?;
            tracing::info!("Database migrations complete");

            let movements: SharedMovementStore = Arc::new(PgMovementStore::new(pool.clone()));
            let locations: SharedLocationStore = Arc::new(PgLocationStore::new(pool));
            Ok((movements, locations))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            let movements: SharedMovementStore = Arc::new(MemoryMovementStore::new());
            let locations: SharedLocationStore = Arc::new(MemoryLocationStore::new());
            Ok((movements, locations))
        }
    }
}
