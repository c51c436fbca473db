//! Resolved configuration for one invocation
//!
//! `Config` is the single source of truth the rest of the program reads. It
//! is immutable after construction and passed by reference into the retry
//! engine; nothing is stored in process-wide state.

use retrier_core::constants::{MAX_KEY, MIN_KEY, RETRIES_KEY, SLEEP_KEY};
use retrier_core::{Error, MatchRules, Result, RetryPolicy};
use retrier_utils::parse_duration;
use std::path::PathBuf;
use std::time::Duration;

use crate::settings::Settings;

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of attempts
    pub retries: u32,

    /// Constant delay between failed attempts
    pub sleep: Duration,

    /// `sleep` exactly as configured, for progress messages
    pub sleep_label: String,

    /// Patterns marking an exit-code-1 failure as expected
    pub regex: Vec<String>,

    /// Reserved lower bound for a future backoff strategy; not consulted
    pub min: Duration,

    /// Reserved upper bound for a future backoff strategy; not consulted
    pub max: Duration,

    /// Configuration file the settings were read from, if any
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Validate a merged settings layer into a `Config`.
    ///
    /// Fields still unset fall back to the built-in defaults.
    pub fn from_settings(settings: Settings, config_file: Option<PathBuf>) -> Result<Self> {
        let settings = Settings::defaults().merge(settings);

        let retries = settings.retries.unwrap_or_default();
        let retries = u32::try_from(retries)
            .ok()
            .filter(|r| *r >= 1)
            .ok_or_else(|| {
                Error::configuration(format!(
                    "{RETRIES_KEY} must be a positive integer, got {retries}"
                ))
            })?;

        let sleep_label = settings.sleep.unwrap_or_default();

        Ok(Self {
            retries,
            sleep: duration_field(SLEEP_KEY, Some(&sleep_label))?,
            sleep_label,
            regex: settings.regex.unwrap_or_default(),
            min: duration_field(MIN_KEY, settings.min.as_deref())?,
            max: duration_field(MAX_KEY, settings.max.as_deref())?,
            config_file,
        })
    }

    /// Attempt bounds for the retry engine
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        Ok(RetryPolicy::new(self.retries, self.sleep)?.with_sleep_label(&self.sleep_label))
    }

    /// Compiled match patterns
    pub fn match_rules(&self) -> Result<MatchRules> {
        MatchRules::compile(&self.regex)
    }
}

fn duration_field(field: &str, value: Option<&str>) -> Result<Duration> {
    let value = value.unwrap_or_default();
    parse_duration(value).map_err(|e| Error::invalid_duration(field, value, e.to_string()))
}
