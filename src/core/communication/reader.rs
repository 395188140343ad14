use crate::domain::error::{TtyDbgError, TtyDbgResult};
use std::io::{self, Read, Write};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Background task echoing device bytes to the console.
///
/// Reads one byte at a time on the blocking pool. The source must have a
/// read timeout so the loop can observe cancellation between reads.
pub struct ReaderTask {
    cancel: CancellationToken,
    stopped: CancellationToken,
    handle: Option<JoinHandle<TtyDbgResult<u64>>>,
}

impl ReaderTask {
    /// Start reading from `source` into `sink`.
    ///
    /// Fails with `TaskStart` when called outside a Tokio runtime.
    pub fn start<R, W>(source: R, sink: W) -> TtyDbgResult<Self>
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| TtyDbgError::TaskStart {
            message: e.to_string(),
        })?;

        let cancel = CancellationToken::new();
        let stopped = CancellationToken::new();

        let loop_cancel = cancel.clone();
        let loop_stopped = stopped.clone();
        let handle = runtime.spawn_blocking(move || {
            let _stopped = loop_stopped.drop_guard();
            read_loop(source, sink, &loop_cancel)
        });

        debug!("Reader task started");
        Ok(Self {
            cancel,
            stopped,
            handle: Some(handle),
        })
    }

    /// Ask the loop to stop after the current read returns
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the loop has exited, for any reason
    pub async fn stopped(&self) {
        self.stopped.cancelled().await;
    }

    /// Wait for the loop to finish and release its resources.
    ///
    /// Returns the number of bytes echoed, or the I/O error that stopped the
    /// loop. Joining a task that was already joined is a no-op returning zero.
    pub async fn join(&mut self) -> TtyDbgResult<u64> {
        match self.handle.take() {
            Some(handle) => {
                let received = handle.await??;
                debug!("Reader task joined after {} bytes", received);
                Ok(received)
            }
            None => Ok(0),
        }
    }
}

impl Drop for ReaderTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel.cancel();
        }
    }
}

fn read_loop<R: Read, W: Write>(
    mut source: R,
    mut sink: W,
    cancel: &CancellationToken,
) -> TtyDbgResult<u64> {
    let mut byte = [0u8; 1];
    let mut received = 0u64;

    while !cancel.is_cancelled() {
        match source.read(&mut byte) {
            Ok(0) => continue,
            Ok(n) => {
                if let Err(e) = sink.write_all(&byte[..n]).and_then(|_| sink.flush()) {
                    debug!("Console write failed, stopping reader: {}", e);
                    return Err(TtyDbgError::Console(e));
                }
                received += n as u64;
            }
            Err(ref e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                continue
            }
            Err(e) => {
                debug!("Device read failed, stopping reader: {}", e);
                return Err(TtyDbgError::Receive(e));
            }
        }
    }

    Ok(received)
}
