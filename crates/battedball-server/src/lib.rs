//! HTTP service for the batted-ball dataset.
//!
//! Exposes a single endpoint, `GET /api/data`, answering filter queries from
//! the [`battedball`] store. The store must be bootstrapped before the router
//! receives traffic; [`run`] does that before binding the listener.

pub mod error;
pub mod handlers;

use std::time::Instant;

use anyhow::Context as _;
use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use battedball::{Config, DatasetStore};
use tracing::info;

pub use error::{ApiError, GENERIC_ERROR_MESSAGE};

/// State shared with every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read-only dataset store.
    pub store: DatasetStore,
}

/// Build the service router over `store`.
pub fn router(store: DatasetStore) -> Router {
    Router::new()
        .route("/api/data", get(handlers::get_data))
        .layer(middleware::from_fn(log_request))
        .with_state(AppState { store })
}

/// Log method, path, status and wall time of every request.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        duration = ?start.elapsed(),
        "Request completed"
    );
    response
}

/// Bootstrap the store, then serve until Ctrl-C.
///
/// # Errors
///
/// Fails without serving if bootstrap fails, or if the listener cannot be
/// bound.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let store = config.store();
    let data_path = config.data_path.clone();
    let bootstrap_store = store.clone();
    tokio::task::spawn_blocking(move || bootstrap_store.bootstrap(&data_path))
        .await
        .context("bootstrap task failed")?
        .context("dataset store is not ready; refusing to serve")?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, store = %store.path().display(), "Listening");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
