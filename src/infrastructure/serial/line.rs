use crate::domain::config::ParityConfig;
use crate::domain::error::{TtyDbgError, TtyDbgResult};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info, warn};

/// Supported line speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaudRate {
    #[default]
    B115200,
    B57600,
    B9600,
}

impl BaudRate {
    /// Map a requested speed onto a supported one.
    ///
    /// Anything outside the supported set falls back to 115200.
    pub fn from_requested(baud: u32) -> Self {
        match baud {
            115_200 => Self::B115200,
            57_600 => Self::B57600,
            9_600 => Self::B9600,
            other => {
                warn!("Unsupported baud rate {}, using 115200", other);
                Self::B115200
            }
        }
    }

    pub fn as_u32(self) -> u32 {
        match self {
            Self::B115200 => 115_200,
            Self::B57600 => 57_600,
            Self::B9600 => 9_600,
        }
    }
}

/// Target line discipline for a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineConfig {
    pub baud: BaudRate,
    pub parity: Parity,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    pub hardware_flow_control: bool,
}

impl LineConfig {
    pub fn new(requested_baud: u32, parity: ParityConfig, hardware_flow_control: bool) -> Self {
        let mut config = Self::baseline(BaudRate::from_requested(requested_baud));
        config.apply_parity(parity);
        config.hardware_flow_control = hardware_flow_control;
        config
    }

    /// 8N1 without flow control
    fn baseline(baud: BaudRate) -> Self {
        Self {
            baud,
            parity: Parity::None,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            hardware_flow_control: false,
        }
    }

    fn apply_parity(&mut self, policy: ParityConfig) {
        self.stop_bits = StopBits::One;
        if policy == ParityConfig::Space {
            warn!("Space parity is not distinguished, applying 8N1");
        }
        match policy {
            ParityConfig::None | ParityConfig::Space => {
                self.parity = Parity::None;
                self.data_bits = DataBits::Eight;
            }
            ParityConfig::Even => {
                self.parity = Parity::Even;
                self.data_bits = DataBits::Seven;
            }
            ParityConfig::Odd => {
                self.parity = Parity::Odd;
                self.data_bits = DataBits::Seven;
            }
        }
    }

    fn flow_control(&self) -> FlowControl {
        if self.hardware_flow_control {
            FlowControl::Hardware
        } else {
            FlowControl::None
        }
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self::baseline(BaudRate::default())
    }
}

/// Line settings as reported by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSnapshot {
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
}

impl LineSnapshot {
    pub fn read<P: SerialPort + ?Sized>(port: &P) -> serialport::Result<Self> {
        Ok(Self {
            baud_rate: port.baud_rate()?,
            data_bits: port.data_bits()?,
            parity: port.parity()?,
            stop_bits: port.stop_bits()?,
            flow_control: port.flow_control()?,
        })
    }
}

/// Commit `config` to the device immediately.
///
/// The device must already be in raw mode, which `serialport` establishes
/// when it opens a port. Each field is committed with `TCSANOW` semantics;
/// any failure is reported before the caller starts reading or writing.
pub fn apply<P: SerialPort + ?Sized>(port: &mut P, config: &LineConfig) -> TtyDbgResult<()> {
    let path = port.name().unwrap_or_else(|| "<unnamed>".to_string());
    let configuration_error = |source: serialport::Error| TtyDbgError::Configuration {
        path: path.clone(),
        source,
    };

    let current = LineSnapshot::read(&*port).map_err(configuration_error)?;
    debug!(?current, "Current line settings on {}", path);

    info!("Setting baud: {}", config.baud.as_u32());
    port.set_baud_rate(config.baud.as_u32()).map_err(configuration_error)?;
    port.set_data_bits(config.data_bits).map_err(configuration_error)?;
    port.set_parity(config.parity).map_err(configuration_error)?;
    port.set_stop_bits(config.stop_bits).map_err(configuration_error)?;
    port.set_flow_control(config.flow_control()).map_err(configuration_error)?;

    let applied = LineSnapshot::read(&*port).map_err(configuration_error)?;
    debug!(?applied, "Applied line settings on {}", path);
    Ok(())
}
