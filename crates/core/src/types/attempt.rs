/// Classification of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command exited 0
    Success,
    /// The command failed and may be tried again
    RetryableFailure,
    /// The command failed in an expected way; stop without retrying
    TerminalFailure,
}

/// Everything captured from a single execution of the command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptResult {
    /// Exit code, `None` if the process never started or was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub outcome: Outcome,
    /// OS error message when the process could not be started
    pub launch_error: Option<String>,
}

impl AttemptResult {
    /// Result for a process that could not be spawned
    pub fn launch_failure(message: impl Into<String>) -> Self {
        Self {
            exit_code: None,
            stdout: Vec::new(),
            stderr: Vec::new(),
            outcome: Outcome::RetryableFailure,
            launch_error: Some(message.into()),
        }
    }
}
