pub mod commands;
pub mod completion;

use clap::error::ErrorKind;
use clap::Parser;
use retrier_core::constants::FAILURE_EXIT_CODE;

pub use commands::Commands;

#[derive(Parser)]
#[command(name = "retry")]
#[command(about = "Retries failed commands", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Exit code for a command line that could not be parsed.
///
/// Help and version requests succeed; a malformed flag value is a
/// configuration error like any other and exits 1.
pub fn parse_error_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => commands::exit_code(FAILURE_EXIT_CODE),
    }
}
