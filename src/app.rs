use std::sync::Arc;

use anyhow::{Context, Result};
use prometheus::Registry;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::collector::MetricsRecorder;
use crate::scheduler::{self, InflightTracker};
use crate::server::{create_router, serve};
use crate::types::Config;

/// Bind the exposition endpoint, start the scheduler and run until
/// `shutdown` fires. Only a bind failure (or the server dying) is an error.
pub async fn run(
    cfg: Config,
    registry: Registry,
    recorder: Arc<dyn MetricsRecorder>,
    inflight: InflightTracker,
    shutdown: CancellationToken,
) -> Result<()> {
    let listener = TcpListener::bind(cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;

    let scheduler = scheduler::start(&cfg, recorder, inflight, shutdown.clone());

    info!("Starting application on {}", cfg.listen_addr);
    let served = serve(listener, create_router(registry), shutdown.clone()).await;

    // The server only returns early on an I/O error; take the rest down with it.
    shutdown.cancel();
    scheduler.join().await;
    info!("Shutdown complete");

    served.context("HTTP server failed")
}
