//! shopping-list-api server entry point.
//!
//! Connects the item store, then serves the REST API until SIGINT or
//! SIGTERM, then closes the store and exits.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use shopping_list_api::api;
use shopping_list_api::app_state::AppState;
use shopping_list_api::config::{AppConfig, LogFormat};
use shopping_list_api::persistence;
use shopping_list_api::service::ItemService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // Initialize tracing
    init_tracing(config.log_format);
    tracing::info!(
        addr = %config.listen_addr,
        backend = ?config.store_backend,
        frontend = %config.frontend_url,
        "starting shopping-list-api"
    );

    // Connect the store; failure here is fatal
    let store = match persistence::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "document store connection failed");
            return Err(e).context("connecting to document store");
        }
    };

    // Build application state and router
    let app_state = AppState::new(ItemService::new(std::sync::Arc::clone(&store)));
    let cors = api::cors_layer(&config.frontend_url).context("invalid FRONTEND_URL")?;
    let app = api::build_app(app_state, cors);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    served.context("server error")?;
    tracing::info!("shutdown complete");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

/// Resolves on the first SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
