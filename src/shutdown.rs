use tokio_util::sync::CancellationToken;

/// Spawn a listener for SIGTERM and SIGINT (Ctrl-C).
///
/// Returns a `CancellationToken` cancelled on the first signal. Producer,
/// workers and the HTTP server all stop on it without draining jobs.
pub fn install_shutdown_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        wait_for_signal().await;
        token_clone.cancel();
    });

    token
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            return wait_for_ctrl_c().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, shutting down");
        }
        _ = wait_for_ctrl_c() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received SIGINT, shutting down"),
        // Without a signal handler the only way out is killing the process.
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGINT handler");
            std::future::pending::<()>().await
        }
    }
}
