// Logging module - Logging infrastructure
use crate::domain::error::{TtyDbgError, TtyDbgResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter directive for the crate's own events
pub fn filter_directive(verbose: bool, base_level: &str) -> String {
    if verbose {
        "ttydbg=debug".to_string()
    } else {
        format!("ttydbg={}", base_level)
    }
}

/// Initialize logging system
///
/// Events go to stderr; stdout carries the bytes read from the device.
/// `RUST_LOG` takes precedence over the computed directive. Calling this
/// again after a subscriber is installed is a no-op.
pub fn init_logging(verbose: bool, base_level: &str) -> TtyDbgResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directive(verbose, base_level)).map_err(|e| {
            TtyDbgError::Config {
                message: format!("Invalid log level '{}': {}", base_level, e),
            }
        })?,
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true)
                .with_thread_ids(verbose)
                .with_line_number(verbose),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("TtyDbg logging system initialized");
    }
    Ok(())
}
