use crate::domain::error::{TtyDbgError, TtyDbgResult};
use serialport::SerialPort;
use std::time::Duration;
use tracing::{debug, info};

/// Baud rate the device is opened with before the line configurator runs
const OPEN_BAUD_RATE: u32 = 115_200;

/// Upper bound for a single blocking write on the device.
///
/// A write still pending after this long fails the session with a
/// transmit error instead of blocking forever.
const WRITE_TIMEOUT: Duration = Duration::from_secs(60);

/// Owned serial device descriptor
///
/// `close` is idempotent: only the first call on an open handle releases
/// the OS resource. Dropping the handle closes it as well.
pub struct PortHandle {
    device_path: String,
    port: Option<Box<dyn SerialPort>>,
}

impl PortHandle {
    /// Open `device_path` for reading and writing.
    ///
    /// The device is opened non-blocking while the line is negotiated and
    /// switched to blocking I/O before it is returned.
    pub fn open(device_path: &str) -> TtyDbgResult<Self> {
        info!("Opening port {}", device_path);

        let port = serialport::new(device_path, OPEN_BAUD_RATE)
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|source| TtyDbgError::DeviceOpen {
                path: device_path.to_string(),
                source,
            })?;

        info!("Port {} opened", device_path);
        Ok(Self::from_port(device_path, port))
    }

    /// Wrap an already open port
    pub fn from_port(device_path: impl Into<String>, port: Box<dyn SerialPort>) -> Self {
        Self {
            device_path: device_path.into(),
            port: Some(port),
        }
    }

    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }

    /// Mutable access to the open port
    pub fn port_mut(&mut self) -> TtyDbgResult<&mut Box<dyn SerialPort>> {
        match self.port.as_mut() {
            Some(port) => Ok(port),
            None => Err(TtyDbgError::NotOpen {
                path: self.device_path.clone(),
            }),
        }
    }

    /// Duplicate the descriptor for the reader.
    ///
    /// The clone gets its own read timeout so the reader can poll for
    /// cancellation without affecting writes on this handle.
    pub fn clone_for_reader(&self, read_timeout: Duration) -> TtyDbgResult<Box<dyn SerialPort>> {
        let port = self.port.as_ref().ok_or_else(|| TtyDbgError::NotOpen {
            path: self.device_path.clone(),
        })?;

        let mut reader_port = port.try_clone().map_err(|e| TtyDbgError::TaskStart {
            message: format!("failed to duplicate {}: {}", self.device_path, e),
        })?;
        reader_port
            .set_timeout(read_timeout)
            .map_err(|e| TtyDbgError::TaskStart {
                message: format!("failed to set read timeout on {}: {}", self.device_path, e),
            })?;

        debug!("Duplicated {} for reader (timeout {:?})", self.device_path, read_timeout);
        Ok(reader_port)
    }

    /// Release the device. Returns `true` only when this call closed it.
    pub fn close(&mut self) -> bool {
        match self.port.take() {
            Some(port) => {
                info!("Closing port {}", self.device_path);
                drop(port);
                true
            }
            None => false,
        }
    }
}

impl Drop for PortHandle {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for PortHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortHandle")
            .field("device_path", &self.device_path)
            .field("is_open", &self.is_open())
            .finish()
    }
}

/// Source of port handles for a session
pub trait PortOpener: Send + Sync {
    fn open(&self, device_path: &str) -> TtyDbgResult<PortHandle>;
}

/// Opens real devices through the `serialport` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPortOpener;

impl PortOpener for SystemPortOpener {
    fn open(&self, device_path: &str) -> TtyDbgResult<PortHandle> {
        PortHandle::open(device_path)
    }
}
