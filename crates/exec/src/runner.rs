use async_trait::async_trait;
use retrier_core::{AttemptResult, Error, Invocation, MatchRules, Outcome};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::console::Console;

/// Trait for performing a single attempt of a command.
///
/// Implementations never fail: a command that cannot be started, or that
/// exits non-zero, is reported through the returned [`AttemptResult`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `invocation` once and classify the result against `rules`
    async fn run(&self, invocation: &Invocation, rules: &MatchRules) -> AttemptResult;
}

/// Production runner that spawns the real child process
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    console: Console,
}

impl SystemCommandRunner {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, invocation: &Invocation, rules: &MatchRules) -> AttemptResult {
        let output = Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        let result = match output {
            Ok(output) => {
                let exit_code = output.status.code();
                if !output.stderr.is_empty() {
                    debug!(stderr = %String::from_utf8_lossy(&output.stderr), "command stderr");
                }
                AttemptResult {
                    exit_code,
                    outcome: classify(exit_code, &output.stdout, rules),
                    stdout: output.stdout,
                    stderr: output.stderr,
                    launch_error: None,
                }
            }
            Err(e) => {
                let err = Error::command_execution(
                    invocation.program(),
                    invocation.args().to_vec(),
                    format!("failed to execute command: {e}"),
                    None,
                );
                warn!(error = %err, "unable to start command");
                AttemptResult::launch_failure(err.to_string())
            }
        };

        self.console.output(&result.stdout);
        result
    }
}

/// Classify one attempt from its exit code and captured standard output.
///
/// Exit code 0 succeeds. Exit code 1 is checked against `rules`: a match
/// means the failure was expected and must not be retried. Every other
/// failure, including a process that never started or died from a signal,
/// is retryable without consulting `rules`.
pub fn classify(exit_code: Option<i32>, stdout: &[u8], rules: &MatchRules) -> Outcome {
    match exit_code {
        Some(0) => Outcome::Success,
        Some(1) => {
            let output = String::from_utf8_lossy(stdout);
            match rules.first_match(&output) {
                Some(pattern) => {
                    debug!(pattern = %pattern, "output matched, not retrying");
                    Outcome::TerminalFailure
                }
                None => Outcome::RetryableFailure,
            }
        }
        _ => Outcome::RetryableFailure,
    }
}

/// Test runner that replays scripted exit codes and output.
///
/// Responses are consumed in order; once the script runs out the last
/// response repeats. Classification goes through [`classify`] so tests
/// exercise the real decision rules.
#[cfg(test)]
pub struct TestCommandRunner {
    script: parking_lot::Mutex<std::collections::VecDeque<TestResponse>>,
    last: parking_lot::Mutex<Option<TestResponse>>,
    calls: std::sync::atomic::AtomicU32,
    console: Option<Console>,
}

#[cfg(test)]
#[derive(Clone, Debug)]
pub enum TestResponse {
    Exit { code: i32, stdout: String },
    LaunchFailure,
}

#[cfg(test)]
impl TestResponse {
    pub fn exit(code: i32, stdout: &str) -> Self {
        TestResponse::Exit {
            code,
            stdout: stdout.to_string(),
        }
    }
}

#[cfg(test)]
impl TestCommandRunner {
    pub fn new(script: impl IntoIterator<Item = TestResponse>) -> Self {
        Self {
            script: parking_lot::Mutex::new(script.into_iter().collect()),
            last: parking_lot::Mutex::new(None),
            calls: std::sync::atomic::AtomicU32::new(0),
            console: None,
        }
    }

    /// Print each scripted stdout to `console`, like the system runner does
    pub fn echo_to(mut self, console: Console) -> Self {
        self.console = Some(console);
        self
    }

    /// A runner that always answers with `response`
    pub fn always(response: TestResponse) -> Self {
        Self::new([response])
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl CommandRunner for TestCommandRunner {
    async fn run(&self, _invocation: &Invocation, rules: &MatchRules) -> AttemptResult {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        let response = {
            let mut last = self.last.lock();
            if let Some(next) = self.script.lock().pop_front() {
                *last = Some(next);
            }
            last.clone()
                .unwrap_or_else(|| TestResponse::exit(0, ""))
        };

        let result = match response {
            TestResponse::Exit { code, stdout } => AttemptResult {
                exit_code: Some(code),
                outcome: classify(Some(code), stdout.as_bytes(), rules),
                stdout: stdout.into_bytes(),
                stderr: Vec::new(),
                launch_error: None,
            },
            TestResponse::LaunchFailure => AttemptResult::launch_failure("no such program"),
        };

        if let Some(console) = &self.console {
            console.output(&result.stdout);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::CapturedOutput;

    fn rules(patterns: &[&str]) -> MatchRules {
        MatchRules::compile(patterns).expect("valid patterns")
    }

    #[test]
    fn test_classify_success() {
        assert_eq!(
            classify(Some(0), b"file not found", &rules(&["not found"])),
            Outcome::Success
        );
    }

    #[test]
    fn test_classify_exit_one_with_match_is_terminal() {
        assert_eq!(
            classify(Some(1), b"error: file not found\n", &rules(&["not found"])),
            Outcome::TerminalFailure
        );
    }

    #[test]
    fn test_classify_exit_one_without_match_is_retryable() {
        assert_eq!(
            classify(Some(1), b"connection refused", &rules(&["not found"])),
            Outcome::RetryableFailure
        );
        assert_eq!(
            classify(Some(1), b"anything", &MatchRules::default()),
            Outcome::RetryableFailure
        );
    }

    #[test]
    fn test_classify_other_codes_ignore_rules() {
        let rules = rules(&["not found"]);
        assert_eq!(
            classify(Some(2), b"file not found", &rules),
            Outcome::RetryableFailure
        );
        assert_eq!(
            classify(Some(127), b"file not found", &rules),
            Outcome::RetryableFailure
        );
        assert_eq!(classify(None, b"file not found", &rules), Outcome::RetryableFailure);
    }

    #[test]
    fn test_classify_matches_stdout_lossily() {
        let mut stdout = b"not \xff found; ".to_vec();
        stdout.extend_from_slice(b"not found");
        assert_eq!(
            classify(Some(1), &stdout, &rules(&["^not found$", "not found"])),
            Outcome::TerminalFailure
        );
    }

    #[tokio::test]
    async fn test_test_runner_replays_script() {
        let runner = TestCommandRunner::new([
            TestResponse::exit(2, ""),
            TestResponse::exit(1, "not found"),
        ]);
        let invocation = Invocation::new("anything", vec![]);
        let rules = rules(&["not found"]);

        assert_eq!(
            runner.run(&invocation, &rules).await.outcome,
            Outcome::RetryableFailure
        );
        assert_eq!(
            runner.run(&invocation, &rules).await.outcome,
            Outcome::TerminalFailure
        );
        // Script exhausted: the last response repeats
        assert_eq!(
            runner.run(&invocation, &rules).await.outcome,
            Outcome::TerminalFailure
        );
        assert_eq!(runner.calls(), 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_success_prints_stdout() {
        let (console, captured) = CapturedOutput::console();
        let runner = SystemCommandRunner::new(console);
        let invocation = Invocation::new(
            "sh",
            vec!["-c".to_string(), "echo hello; echo oops >&2".to_string()],
        );

        let result = runner.run(&invocation, &MatchRules::default()).await;

        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout, b"hello\n");
        assert_eq!(result.stderr, b"oops\n");
        assert_eq!(captured.contents(), "hello\n\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_matches_stdout_not_stderr() {
        let (console, _captured) = CapturedOutput::console();
        let runner = SystemCommandRunner::new(console);
        let rules = rules(&["not found"]);

        let on_stderr = Invocation::new(
            "sh",
            vec!["-c".to_string(), "echo 'file not found' >&2; exit 1".to_string()],
        );
        let result = runner.run(&on_stderr, &rules).await;
        assert_eq!(result.outcome, Outcome::RetryableFailure);

        let on_stdout = Invocation::new(
            "sh",
            vec!["-c".to_string(), "echo 'file not found'; exit 1".to_string()],
        );
        let result = runner.run(&on_stdout, &rules).await;
        assert_eq!(result.outcome, Outcome::TerminalFailure);
        assert_eq!(result.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_non_one_exit_is_retryable() {
        let (console, captured) = CapturedOutput::console();
        let runner = SystemCommandRunner::new(console);
        let invocation = Invocation::new(
            "sh",
            vec!["-c".to_string(), "echo 'file not found'; exit 2".to_string()],
        );

        let result = runner.run(&invocation, &rules(&["not found"])).await;
        assert_eq!(result.outcome, Outcome::RetryableFailure);
        assert_eq!(result.exit_code, Some(2));
        assert_eq!(captured.contents(), "file not found\n\n");
    }

    #[tokio::test]
    async fn test_system_runner_launch_failure_is_a_result() {
        let (console, captured) = CapturedOutput::console();
        let runner = SystemCommandRunner::new(console);
        let invocation = Invocation::new("retrier-definitely-not-a-real-program", vec![]);

        let result = runner.run(&invocation, &rules(&[".*"])).await;

        assert_eq!(result.outcome, Outcome::RetryableFailure);
        assert_eq!(result.exit_code, None);
        let message = result.launch_error.expect("launch error recorded");
        assert!(message.contains("retrier-definitely-not-a-real-program"));
        assert_eq!(captured.contents(), "\n");
    }
}
