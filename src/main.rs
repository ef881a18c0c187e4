use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use identity_core::{
    config::{features_from_env_value, general_default_from_env_value},
    CoreConfig, FormatterDefaults, IdentityController, MemoryStore, Registries, WriteBack,
};

/// Main entry point for the identity hub.
///
/// Starts the REST server backed by the in-memory store. No registry clients are wired in this
/// binary, so every cache miss reports a registry failure unless `disable-upstream` is set.
///
/// # Environment Variables
/// - `IDENTITY_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `IDENTITY_FEATURES`: comma separated feature switches, e.g. `disable-upstream`
/// - `IDENTITY_SEED_FILE`: JSON file to preload the store from
/// - `IDENTITY_DEFAULT_VALUE`: general fallback for compatibility fields (default: "N/A")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration or seed file is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("identity_hub=info".parse()?)
                .add_directive("identity_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("IDENTITY_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let features = features_from_env_value(std::env::var("IDENTITY_FEATURES").ok())?;
    let defaults = FormatterDefaults::with_general(general_default_from_env_value(
        std::env::var("IDENTITY_DEFAULT_VALUE").ok(),
    ));
    let cfg = Arc::new(CoreConfig::new(features, defaults));
    tracing::info!(features = ?cfg.features().names(), "configuration resolved");

    let store = match std::env::var("IDENTITY_SEED_FILE").ok().map(PathBuf::from) {
        Some(path) => {
            tracing::info!("++ Seeding store from {}", path.display());
            Arc::new(MemoryStore::from_seed_file(&path)?)
        }
        None => Arc::new(MemoryStore::new()),
    };

    let (write_back, worker) = WriteBack::spawn(store.clone());
    let controller = IdentityController::new(store, Registries::unconfigured(), write_back, cfg);
    let app = api_rest::router(AppState { controller });

    tracing::info!("++ Starting identity hub REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last queue sender; wait for pending write-backs.
    worker.await?;
    tracing::info!("-- identity hub stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
