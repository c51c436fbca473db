//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for retrier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for retrier operations.
///
/// Only configuration-level failures are raised as errors. A child process
/// that fails to start or exits non-zero is reported through
/// [`AttemptResult`](crate::AttemptResult) instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A duration string that could not be parsed
    #[error("invalid duration '{value}' for '{field}': {message}")]
    InvalidDuration {
        field: String,
        value: String,
        message: String,
    },

    /// A match pattern that failed to compile
    #[error("invalid regex '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// File system operations
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML decoding errors for the configuration file
    #[error("unable to decode config file '{}': {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// No command was supplied on the command line
    #[error("no command supplied")]
    MissingCommand,

    /// Command execution errors
    #[error("{}", format_command_error(.command, .args, .message, .exit_code))]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },
}

fn format_command_error(
    command: &str,
    args: &[String],
    message: &str,
    exit_code: &Option<i32>,
) -> String {
    let args_str = args.join(" ");
    let shown = if args_str.is_empty() {
        command.to_string()
    } else {
        format!("{command} {args_str}")
    };
    match exit_code {
        Some(code) => format!("command '{shown}' failed with exit code {code}: {message}"),
        None => format!("command '{shown}' failed: {message}"),
    }
}
