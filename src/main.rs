// TtyDbg - Serial Port Debugging Tool
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::process::ExitCode;
use ttydbg::cli::{execute_command, Args};
use ttydbg::domain::error::{EXIT_SUCCESS, EXIT_USAGE};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return ExitCode::from(EXIT_SUCCESS);
            }
            _ => {
                let _ = e.print();
                eprintln!("{}", Args::command().render_help());
                return ExitCode::from(EXIT_USAGE);
            }
        },
    };

    match execute_command(args).await {
        Ok(_) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
