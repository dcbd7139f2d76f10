//! # User Registry API Server
//!
//! Serves the user registry endpoints:
//!
//! - `POST /v1/users` creates a user with a unique email
//! - `GET /v1/users?email=...` looks a user up by email
//! - `GET /health` reports store connectivity
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/userreg cargo run -p userreg-api
//! STORE_BACKEND=memory cargo run -p userreg-api
//! ```

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userreg_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat, StoreBackend},
};
use userreg_shared::{
    db::pool::{close_pool, create_pool, DatabaseConfig},
    store::{InMemoryUserStore, PgUserStore, UserStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!(
        "User registry API v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let (store, pool): (Arc<dyn UserStore>, _) = match config.store.backend {
        StoreBackend::Postgres => {
            let database = config
                .store
                .database
                .clone()
                .context("DATABASE_URL environment variable is required")?;

            let pool = create_pool(DatabaseConfig {
                url: database.url,
                max_connections: database.max_connections,
                ..Default::default()
            })
            .await
            .context("Failed to connect to the database")?;

            let store = PgUserStore::new(pool.clone(), config.store.users_table.clone())?;
            store
                .ensure_schema()
                .await
                .context("Failed to prepare the users table")?;

            tracing::info!(table = %store.table(), "Using PostgreSQL user store");
            (Arc::new(store) as Arc<dyn UserStore>, Some(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store; records are lost on shutdown");
            (Arc::new(InMemoryUserStore::new()) as Arc<dyn UserStore>, None)
        }
    };

    let app = build_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "userreg_api=debug,userreg_shared=info,tower_http=debug".into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
