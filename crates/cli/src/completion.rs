use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::Cli;

/// Print the completion script for `shell` to stdout
pub fn generate_completion(shell: Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut std::io::stdout());
}
