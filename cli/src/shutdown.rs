use std::io;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Returns a token that is cancelled on Ctrl+C or SIGTERM.
pub fn cancel_on_signal() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        first_signal(signal::ctrl_c(), wait_for_sigterm()).await;
        warn!("Interrupted, stopping the analysis...");
        trigger.cancel();
    });

    token
}

/// Resolves on whichever signal comes first. If Ctrl+C cannot be watched,
/// SIGTERM still can.
async fn first_signal(
    ctrl_c: impl Future<Output = io::Result<()>>,
    sigterm: impl Future<Output = ()>,
) {
    tokio::pin!(sigterm);
    tokio::select! {
        res = ctrl_c => {
            if let Err(e) = res {
                warn!("Failed to listen for Ctrl+C: {e}");
                (&mut sigterm).await;
            }
        }
        _ = &mut sigterm => {}
    }
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("Failed to register SIGTERM handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
