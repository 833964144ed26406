use std::env;
use std::sync::Arc;

use anyhow::Context;
use recipe_share::config::{Config, StorageBackend};
use recipe_share::store::memory::MemoryRecipeStore;
use recipe_share::store::postgres::PgRecipeStore;
use recipe_share::{api, app, db, telemetry, AppState};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    telemetry::init_telemetry()?;

    let config = Config::from_env()?;

    let store: AppState = match config.storage {
        StorageBackend::Postgres { database_url } => {
            let pool = tokio::task::spawn_blocking(move || db::create_pool(&database_url))
                .await
                .context("Database setup task panicked")??;
            Arc::new(PgRecipeStore::new(pool))
        }
        StorageBackend::Memory { seeded } => {
            tracing::warn!("Using in-memory storage; recipes will not survive a restart");
            if seeded {
                Arc::new(MemoryRecipeStore::seeded())
            } else {
                Arc::new(MemoryRecipeStore::new())
            }
        }
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", local_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", local_addr);

    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
