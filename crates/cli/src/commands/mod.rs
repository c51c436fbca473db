use clap::Subcommand;
use clap_complete::Shell;
use retrier_core::constants::{FAILURE_EXIT_CODE, MISSING_COMMAND_MESSAGE};
use retrier_core::Error;
use retrier_exec::Console;

pub mod run;

use self::run::RunArgs;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a command, retrying it while it fails
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Execute the subcommand and return the process exit code
    pub async fn execute(self) -> u8 {
        match self {
            Commands::Run(args) => match args.execute(Console::stdout()).await {
                Ok(report) => exit_code(report.exit_code()),
                Err(Error::MissingCommand) => {
                    println!("{MISSING_COMMAND_MESSAGE}");
                    exit_code(FAILURE_EXIT_CODE)
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    exit_code(FAILURE_EXIT_CODE)
                }
            },
            Commands::Completion { shell } => {
                crate::completion::generate_completion(shell);
                0
            }
        }
    }
}

pub(crate) fn exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
