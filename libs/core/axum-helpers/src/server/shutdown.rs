use std::time::Duration;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info};

/// Completes when the process receives SIGINT (Ctrl+C) or SIGTERM.
///
/// Usable directly with `axum::serve().with_graceful_shutdown()`. If a
/// handler cannot be installed the failure is logged and that signal source
/// never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}

/// Waits for [`shutdown_signal`], then tells `signalled` it fired.
pub(crate) async fn signal_and_notify(signalled: oneshot::Sender<()>) {
    shutdown_signal().await;
    let _ = signalled.send(());
}

/// Resolves `grace` after the shutdown notice arrives.
///
/// Never resolves if the sender is dropped without sending, so a server
/// that stops on its own is never cut short.
pub(crate) async fn drain_deadline(signalled: oneshot::Receiver<()>, grace: Duration) {
    if signalled.await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}
