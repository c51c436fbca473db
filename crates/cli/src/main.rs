use clap::Parser;
use retrier::{parse_error_exit_code, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = retrier_utils::tracing::init() {
        eprintln!("failed to initialise logging: {e}");
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(io) = e.print() {
                eprintln!("failed to print usage error: {io}");
            }
            return ExitCode::from(parse_error_exit_code(&e));
        }
    };
    ExitCode::from(cli.command.execute().await)
}
