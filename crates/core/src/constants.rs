/// Constants used throughout the retrier codebase
// Flag defaults
pub const DEFAULT_RETRIES: u32 = 9;
pub const DEFAULT_SLEEP: &str = "5s";
pub const DEFAULT_MIN: &str = "10s";
pub const DEFAULT_MAX: &str = "10s";

// Flag names, also the keys of the configuration file
pub const RETRIES_KEY: &str = "retries";
pub const SLEEP_KEY: &str = "sleep";
pub const REGEX_KEY: &str = "regex";
pub const MIN_KEY: &str = "min";
pub const MAX_KEY: &str = "max";
pub const CONFIG_KEY: &str = "config";

// Exit code reserved for matched and exhausted failures
pub const FAILURE_EXIT_CODE: i32 = 1;

// Progress messages
pub const EXECUTING_MESSAGE: &str = "Executing command in retriable CLI...";
pub const MISSING_COMMAND_MESSAGE: &str = "Please provide a command to execute.";
pub const FAILED_AFTER_RETRIES_MESSAGE: &str = "Command execution failed after retries.";

/// Environment variable bound to a flag: upper-cased with `-` and `.` replaced by `_`.
pub fn flag_env_var(flag: &str) -> String {
    flag.replace(['-', '.'], "_").to_uppercase()
}
