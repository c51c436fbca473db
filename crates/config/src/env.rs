//! Environment variable layer

use retrier_core::constants::{flag_env_var, MAX_KEY, MIN_KEY, REGEX_KEY, RETRIES_KEY, SLEEP_KEY};
use retrier_core::{Error, Result};
use std::collections::HashMap;

use crate::settings::Settings;

/// Snapshot of the environment variables the resolver reads.
///
/// Resolution never consults the live process environment directly, which
/// keeps it deterministic under test.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Capture the current process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a source from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value bound to `flag`; empty values count as unset
    pub fn get(&self, flag: &str) -> Option<&str> {
        self.vars
            .get(&flag_env_var(flag))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Read the settings layer held in the environment
    pub fn settings(&self) -> Result<Settings> {
        let retries = match self.get(RETRIES_KEY) {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|e| {
                Error::configuration(format!(
                    "invalid value '{raw}' for {}: {e}",
                    flag_env_var(RETRIES_KEY)
                ))
            })?),
            None => None,
        };

        Ok(Settings {
            retries,
            sleep: self.get(SLEEP_KEY).map(str::to_string),
            regex: self.get(REGEX_KEY).map(split_list),
            min: self.get(MIN_KEY).map(str::to_string),
            max: self.get(MAX_KEY).map(str::to_string),
        })
    }
}

/// Split a comma-separated list, dropping blank entries
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
