// Serial module - Device handle and line configuration
pub mod line;
pub mod port;

pub use line::{BaudRate, LineConfig, LineSnapshot};
pub use port::{PortHandle, PortOpener, SystemPortOpener};
