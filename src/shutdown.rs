use tokio_util::sync::CancellationToken;
use tracing::warn;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Cancels `token` on Ctrl+C (or SIGTERM on unix).
///
/// The task ends on its own once `token` is cancelled by anyone else.
pub fn setup_signal_shutdown_handler(token: &CancellationToken) -> tokio::task::JoinHandle<()> {
    let token = token.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                () = token.cancelled() => {}
                _ = tokio::signal::ctrl_c() => {
                    warn!("Interrupted, cancelling outstanding requests");
                    token.cancel();
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    warn!("Terminated, cancelling outstanding requests");
                    token.cancel();
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                () = token.cancelled() => {}
                _ = tokio::signal::ctrl_c() => {
                    warn!("Interrupted, cancelling outstanding requests");
                    token.cancel();
                }
            }
        }
    })
}
