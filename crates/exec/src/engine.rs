//! The retry loop
//!
//! The engine is a small state machine. It starts `Running`, performs at
//! most `max_attempts` attempts, and ends in exactly one of three terminal
//! states:
//!
//! - `Succeeded`: an attempt exited 0.
//! - `MatchedTerminal`: an attempt exited 1 with output matching a rule;
//!   the loop stops at once, without sleeping.
//! - `ExhaustedRetries`: every attempt failed in a retryable way.
//!
//! Only `Succeeded` counts as overall success.

use retrier_core::constants::{FAILED_AFTER_RETRIES_MESSAGE, FAILURE_EXIT_CODE};
use retrier_core::{AttemptResult, Invocation, MatchRules, Outcome, RetryPolicy};
use retrier_utils::format_duration;
use retrier_utils::tracing::attempt_span;
use tracing::{debug, info, Instrument};

use crate::console::Console;
use crate::runner::CommandRunner;

/// States of the retry loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Succeeded,
    ExhaustedRetries,
    MatchedTerminal,
}

impl EngineState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EngineState::Running)
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub state: EngineState,
    /// Number of attempts actually made
    pub attempts: u32,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.state == EngineState::Succeeded
    }

    /// Process exit code for this result
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            FAILURE_EXIT_CODE
        }
    }
}

/// Drives attempts of one invocation until success, a matched failure, or
/// the attempt budget runs out.
pub struct RetryEngine<R> {
    policy: RetryPolicy,
    rules: MatchRules,
    runner: R,
    console: Console,
}

impl<R: CommandRunner> RetryEngine<R> {
    pub fn new(policy: RetryPolicy, rules: MatchRules, runner: R, console: Console) -> Self {
        Self {
            policy,
            rules,
            runner,
            console,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `invocation` until it reaches a terminal state
    pub async fn execute(&self, invocation: &Invocation) -> RunReport {
        let max_attempts = self.policy.max_attempts();
        let mut state = EngineState::Running;
        let mut attempts = 0;

        while attempts < max_attempts && !state.is_terminal() {
            attempts += 1;
            let span = attempt_span(attempts, max_attempts);
            state = async {
                let result = self.runner.run(invocation, &self.rules).await;
                debug!(
                    exit_code = ?result.exit_code,
                    outcome = ?result.outcome,
                    "attempt finished"
                );
                self.transition(&result, attempts).await
            }
            .instrument(span)
            .await;
        }

        if state == EngineState::Running {
            state = EngineState::ExhaustedRetries;
        }

        let report = RunReport { state, attempts };
        info!(state = ?report.state, attempts = report.attempts, "run finished");
        if !report.is_success() {
            self.console.line(FAILED_AFTER_RETRIES_MESSAGE);
        }
        report
    }

    /// Next state after an attempt. Every retryable failure sleeps, the
    /// last one included; the attempt bound in `execute` ends the loop.
    async fn transition(&self, result: &AttemptResult, attempt: u32) -> EngineState {
        match result.outcome {
            Outcome::Success => EngineState::Succeeded,
            Outcome::TerminalFailure => EngineState::MatchedTerminal,
            Outcome::RetryableFailure => {
                let sleep = self.policy.sleep_interval();
                let label = self
                    .policy
                    .sleep_label()
                    .map_or_else(|| format_duration(sleep), str::to_string);
                self.console.line(&format!(
                    "Encountered an error eligible for retrying. Attempt {attempt}/{} failed. Sleeping {label} before retrying.",
                    self.policy.max_attempts()
                ));
                tokio::time::sleep(sleep).await;
                EngineState::Running
            }
        }
    }
}
