// CLI module - Command line interface
pub mod args;
pub mod commands;

pub use args::{Args, ParityArg};
pub use commands::{execute_command, session_config};
