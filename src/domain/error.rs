use thiserror::Error;

/// Exit code for a normal run, including a signal-driven shutdown
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for malformed command line arguments
pub const EXIT_USAGE: u8 = 1;
/// Exit code for any runtime failure
pub const EXIT_RUNTIME: u8 = 3;

/// TtyDbg unified error type
///
/// Every variant is terminal for the current invocation. The `Display`
/// output is the one-line diagnostic printed before the process exits.
#[derive(Error, Debug)]
pub enum TtyDbgError {
    #[error("open failed: {path}: {source}")]
    DeviceOpen {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("no target specified")]
    NoTarget,

    #[error("port {path} is not open")]
    NotOpen { path: String },

    #[error("setting line configuration failed on {path}: {source}")]
    Configuration {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("reader task failed to start: {message}")]
    TaskStart { message: String },

    #[error("reader task join failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("write failed: {0}")]
    Transmit(#[source] std::io::Error),

    #[error("read failed: {0}")]
    Receive(#[source] std::io::Error),

    #[error("console write failed: {0}")]
    Console(#[source] std::io::Error),

    #[error("illegal input: {0}")]
    Encoding(String),

    #[error("illegal count: {count}")]
    InvalidCount { count: i64 },

    #[error("signal subscription failed: {0}")]
    SignalSubscription(#[source] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl TtyDbgError {
    /// Process exit code for this error category
    pub fn exit_code(&self) -> u8 {
        EXIT_RUNTIME
    }
}

pub type TtyDbgResult<T> = Result<T, TtyDbgError>;
