use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command line arguments for TtyDbg
#[derive(Parser, Debug)]
#[command(
    name = "ttydbg",
    version = env!("CARGO_PKG_VERSION"),
    about = "Serial port debugging tool"
)]
pub struct Args {
    /// Open target serial port, eg. /dev/ttyUSB0
    #[arg(short = 'o', long = "open", value_name = "DEVICE")]
    pub device: Option<String>,

    /// Baud rate (115200, 57600 or 9600), default 115200
    #[arg(short, long, value_name = "BAUD")]
    pub baud: Option<u32>,

    /// Read from the port and echo to stdout until interrupted
    #[arg(short, long)]
    pub read: bool,

    /// Write TEXT to the port
    #[arg(short, long, value_name = "TEXT")]
    pub write: Option<String>,

    /// Parse the write payload as hex digits
    #[arg(short = 'x', long)]
    pub hex: bool,

    /// Number of transmissions; negative repeats while an interval is set
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    pub count: i64,

    /// Seconds between transmissions
    #[arg(short = 't', long = "interval", value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Parity; space is applied as none
    #[arg(long, value_enum)]
    pub parity: Option<ParityArg>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a default configuration file to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub init_config: Option<PathBuf>,

    /// Extra arguments are logged and otherwise ignored
    #[arg(value_name = "ARGS")]
    pub extra: Vec<String>,
}

/// Parity configuration argument
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ParityArg {
    None,
    Even,
    Odd,
    Space,
}

impl From<ParityArg> for crate::domain::config::ParityConfig {
    fn from(parity: ParityArg) -> Self {
        match parity {
            ParityArg::None => Self::None,
            ParityArg::Even => Self::Even,
            ParityArg::Odd => Self::Odd,
            ParityArg::Space => Self::Space,
        }
    }
}
