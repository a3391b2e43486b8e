use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::api::build_router;
use crate::store::PetStore;

pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Serve the pet store API until Ctrl+C.
pub async fn run(settings: ServerSettings, store: Arc<PetStore>) -> Result<()> {
    let ServerSettings { host, port } = settings;
    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    serve(listener, store).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, store: Arc<PetStore>) -> Result<()> {
    let addr: SocketAddr = listener.local_addr()?;
    let router = build_router(store);

    info!("pet store listening on http://{addr} (Ctrl+C to stop)");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("pet store stopped");

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
