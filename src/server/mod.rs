//! HTTP front end.
//!
//! Serves the query and data-query scripts from [`routes`] behind a router
//! that rewrites `/abs/<bibcode>` paths before dispatch.

pub mod cgi;
pub mod router;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::QueryConfig;
use crate::sources::SearchBackend;

/// Shared state for request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub backend: Arc<dyn SearchBackend>,
    pub query_defaults: Arc<QueryConfig>,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>, query_defaults: QueryConfig) -> Self {
        Self {
            backend,
            query_defaults: Arc::new(query_defaults),
        }
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), HttpError> {
    let backend = state.backend.name().to_string();
    let router = router::build(state);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, backend = %backend, "http server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
