use crate::domain::error::{TtyDbgError, TtyDbgResult};
use std::future::Future;
use std::pin::Pin;
use tracing::info;

/// Resolves once the process has been asked to terminate
pub type ShutdownSignal = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Subscribe to SIGINT and SIGTERM.
///
/// The handlers only record delivery; the returned future is awaited by the
/// session controller, which performs the shutdown in normal task context.
/// Must be called from within a Tokio runtime.
#[cfg(unix)]
pub fn termination() -> TtyDbgResult<ShutdownSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate =
        signal(SignalKind::terminate()).map_err(TtyDbgError::SignalSubscription)?;
    let mut interrupt =
        signal(SignalKind::interrupt()).map_err(TtyDbgError::SignalSubscription)?;

    Ok(Box::pin(async move {
        tokio::select! {
            _ = terminate.recv() => info!("SIGTERM received"),
            _ = interrupt.recv() => info!("SIGINT received"),
        }
    }))
}

#[cfg(not(unix))]
pub fn termination() -> TtyDbgResult<ShutdownSignal> {
    Ok(Box::pin(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received");
        }
    }))
}
