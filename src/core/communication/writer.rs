use crate::core::communication::{payload::WritePayload, repeat::RepeatPolicy};
use crate::domain::error::{TtyDbgError, TtyDbgResult};
use std::io::Write;
use tracing::{debug, info, warn};

/// Totals of a finished writer run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransmitReport {
    pub transmissions: u64,
    pub bytes_written: u64,
}

/// Encode `payload` and write it to `port` as often as `policy` says.
///
/// The count and the payload are validated before the first write. A short
/// write is logged but not retried; any write error ends the run. The sleep
/// between transmissions is an await point, so dropping this future (for
/// example on a termination signal) preempts the next transmission.
pub async fn transmit<W: Write + ?Sized>(
    port: &mut W,
    payload: &WritePayload,
    policy: &RepeatPolicy,
) -> TtyDbgResult<TransmitReport> {
    let mut schedule = policy.schedule()?;
    let bytes = payload.encode()?;
    let mut report = TransmitReport::default();

    if schedule.is_exhausted() {
        debug!("Repeat count is zero, nothing to write");
        return Ok(report);
    }

    loop {
        debug!("Writing buffer({})", bytes.len());
        let written = port.write(bytes.as_slice()).map_err(TtyDbgError::Transmit)?;
        report.transmissions += 1;
        report.bytes_written += written as u64;

        if written < bytes.len() {
            warn!("Short write: {} of {} bytes accepted", written, bytes.len());
        }
        info!("{} bytes wrote", written);

        match schedule.after_transmission() {
            Some(delay) => tokio::time::sleep(delay).await,
            None => break,
        }
    }

    Ok(report)
}
