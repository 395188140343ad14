//! TtyDbg Library
//!
//! Serial port debugging tool library: opens a tty device, applies its
//! line settings, echoes incoming bytes and writes payloads under a
//! repeat policy, with an ordered teardown on every exit path.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use self::core::communication::{PayloadEncoding, ReaderTask, RepeatPolicy, WritePayload};
pub use self::core::session::{
    LifecycleEvent, Session, SessionConfig, SessionOutcome, SessionStatus,
};
pub use domain::config::{ParityConfig, TtyDbgConfig};
pub use domain::error::{TtyDbgError, TtyDbgResult};
pub use infrastructure::serial::{LineConfig, PortHandle, PortOpener};
