use crate::cli::args::Args;
use crate::core::communication::{PayloadEncoding, RepeatPolicy, WritePayload};
use crate::core::session::{Session, SessionConfig, SessionOutcome};
use crate::domain::config::TtyDbgConfig;
use crate::domain::error::TtyDbgResult;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::serial::LineConfig;
use crate::infrastructure::signal;
use std::time::Duration;
use tracing::info;

/// Execute CLI command
pub async fn execute_command(args: Args) -> TtyDbgResult<SessionOutcome> {
    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };

    if let Some(path) = &args.init_config {
        config_manager.init_config(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(SessionOutcome::Completed);
    }

    let config = config_manager.load_config()?;
    init_logging(args.verbose, &config.global.log_level)?;

    for extra in &args.extra {
        info!("Non-option argument {}", extra);
    }

    let shutdown = signal::termination()?;
    let mut session = Session::new(session_config(&args, &config));
    session.run(shutdown).await
}

/// Merge command line arguments over file defaults
pub fn session_config(args: &Args, config: &TtyDbgConfig) -> SessionConfig {
    let parity = args.parity.map(Into::into).unwrap_or(config.line.parity);
    let baud = args.baud.unwrap_or(config.line.baud_rate);
    let encoding = if args.hex {
        PayloadEncoding::Hex
    } else {
        PayloadEncoding::Utf8Bytes
    };

    SessionConfig {
        device: args.device.clone(),
        // Flow control is always off.
        line: LineConfig::new(baud, parity, false),
        read: args.read,
        write: args
            .write
            .as_ref()
            .map(|text| WritePayload::new(text.clone(), encoding)),
        repeat: RepeatPolicy::new(args.count, args.interval.or(config.line.interval_secs)),
        read_timeout: Duration::from_millis(config.line.read_timeout_ms),
    }
}
