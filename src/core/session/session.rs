use crate::core::communication::{writer, ReaderTask, RepeatPolicy, WritePayload};
use crate::core::session::state::{LifecycleEvent, SessionState, SessionStatus};
use crate::domain::error::{TtyDbgError, TtyDbgResult};
use crate::infrastructure::serial::{line, LineConfig, PortHandle, PortOpener, SystemPortOpener};
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, info};

/// Everything one invocation needs to know
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Device to open; required before any I/O
    pub device: Option<String>,
    /// Line settings applied right after opening
    pub line: LineConfig,
    /// Start the reader task
    pub read: bool,
    /// Payload for the writer loop
    pub write: Option<WritePayload>,
    /// Repeat policy for the writer loop
    pub repeat: RepeatPolicy,
    /// Reader wake-up interval for observing cancellation
    pub read_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            device: None,
            line: LineConfig::default(),
            read: false,
            write: None,
            repeat: RepeatPolicy::default(),
            read_timeout: Duration::from_millis(100),
        }
    }
}

/// How a session that did not fail came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Writer finished and, if reading, the reader stopped on its own
    Completed,
    /// A termination request arrived first
    Terminated,
}

/// Single serial device session.
///
/// Owns the port handle and the reader task. Whatever ends the session
/// (completion, error or termination request), teardown always runs in
/// the same order: cancel reader, join reader, close port.
pub struct Session {
    config: SessionConfig,
    opener: Box<dyn PortOpener>,
    console: Option<Box<dyn Write + Send>>,
    state: SessionState,
    // Declared before `port` so an unfinished session cancels the reader
    // before the descriptor is released.
    reader: Option<ReaderTask>,
    port: Option<PortHandle>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            opener: Box::new(SystemPortOpener),
            console: None,
            state: SessionState::new(),
            reader: None,
            port: None,
        }
    }

    /// Replace how the device is opened
    pub fn with_opener(mut self, opener: impl PortOpener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    /// Replace stdout as the destination of received bytes
    pub fn with_console(mut self, console: impl Write + Send + 'static) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    /// Drive the session until it completes, fails, or `shutdown` resolves.
    ///
    /// The shutdown sequence has run by the time this returns, on every
    /// path. A session runs at most once.
    pub async fn run<S>(&mut self, shutdown: S) -> TtyDbgResult<SessionOutcome>
    where
        S: Future<Output = ()>,
    {
        if self.state.status != SessionStatus::Idle {
            return Err(TtyDbgError::Unknown(format!(
                "session cannot run from state {:?}",
                self.state.status
            )));
        }

        let result = tokio::select! {
            biased;

            _ = shutdown => {
                info!("Shutting down..");
                Ok(SessionOutcome::Terminated)
            }
            result = self.drive() => result,
        };

        let teardown = self.shutdown().await;
        let outcome = result?;
        teardown?;

        let statistics = &self.state.statistics;
        info!(
            "Session finished: {} bytes sent in {} transmissions, {} bytes received",
            statistics.bytes_sent, statistics.transmissions, statistics.bytes_received
        );
        Ok(outcome)
    }

    async fn drive(&mut self) -> TtyDbgResult<SessionOutcome> {
        let device = self.config.device.clone().ok_or(TtyDbgError::NoTarget)?;

        self.state.update_status(SessionStatus::Opening);
        let port = self.port.insert(self.opener.open(&device)?);
        self.state.record(LifecycleEvent::PortOpened);

        self.state.update_status(SessionStatus::Configuring);
        line::apply(&mut **port.port_mut()?, &self.config.line)?;
        self.state.record(LifecycleEvent::LineConfigured);
        info!("Line configured on {}", device);

        self.state.update_status(SessionStatus::Active);
        if self.config.read {
            let source = port.clone_for_reader(self.config.read_timeout)?;
            let console = self
                .console
                .take()
                .unwrap_or_else(|| Box::new(io::stdout()) as Box<dyn Write + Send>);
            self.reader = Some(ReaderTask::start(source, console)?);
            self.state.record(LifecycleEvent::ReaderStarted);
        }

        if let Some(payload) = &self.config.write {
            let report = writer::transmit(port.port_mut()?, payload, &self.config.repeat).await?;
            self.state.record(LifecycleEvent::Transmitted {
                transmissions: report.transmissions,
                bytes: report.bytes_written,
            });
        }

        // The reader only stops by itself on an I/O error; joining it in
        // `shutdown` turns that into the session's error.
        if let Some(reader) = &self.reader {
            debug!("Waiting for reader");
            reader.stopped().await;
            debug!("Reader stopped on its own");
        }

        Ok(SessionOutcome::Completed)
    }

    async fn shutdown(&mut self) -> TtyDbgResult<()> {
        if self.state.is_terminated() {
            return Ok(());
        }
        self.state.update_status(SessionStatus::ShuttingDown);

        let mut joined = Ok(());
        if let Some(mut reader) = self.reader.take() {
            reader.cancel();
            self.state.record(LifecycleEvent::ReaderCancelled);

            match reader.join().await {
                Ok(received) => self.state.statistics.bytes_received += received,
                Err(e) => {
                    debug!("Reader ended with an error: {}", e);
                    joined = Err(e);
                }
            }
            self.state.record(LifecycleEvent::ReaderJoined);
        }

        if let Some(mut port) = self.port.take() {
            if port.close() {
                self.state.record(LifecycleEvent::PortClosed);
            }
        }

        self.state.update_status(SessionStatus::Terminated);
        joined
    }
}
