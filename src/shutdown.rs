use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;

/// Install a shutdown handler that listens for SIGTERM and SIGINT.
///
/// Returns a `CancellationToken` that is cancelled when either signal is received.
/// The dashboard server watches this token and stops accepting connections.
pub fn install_shutdown_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        wait_for_signal().await;
        token_clone.cancel();
    });

    token
}

async fn wait_for_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler, relying on SIGINT");
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received SIGINT, initiating graceful shutdown");
            }
            return;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(sigint) => sigint,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGINT handler, relying on SIGTERM");
            sigterm.recv().await;
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            tracing::info!("Received SIGINT, initiating graceful shutdown");
        }
    }
}
