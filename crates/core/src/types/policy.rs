use crate::errors::{Error, Result};
use std::time::Duration;

/// Bounds of the retry loop: how many attempts and how long to wait between
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    sleep_interval: Duration,
    /// Sleep interval as the user wrote it, shown in progress lines
    sleep_label: Option<String>,
}

impl RetryPolicy {
    /// Create a policy. At least one attempt is always made, so zero is
    /// rejected.
    pub fn new(max_attempts: u32, sleep_interval: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(Error::configuration("retries must be at least 1"));
        }
        Ok(Self {
            max_attempts,
            sleep_interval,
            sleep_label: None,
        })
    }

    /// Keep the configured text of the sleep interval for display
    #[must_use]
    pub fn with_sleep_label(mut self, label: impl Into<String>) -> Self {
        self.sleep_label = Some(label.into());
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn sleep_interval(&self) -> Duration {
        self.sleep_interval
    }

    pub fn sleep_label(&self) -> Option<&str> {
        self.sleep_label.as_deref()
    }
}
