//! One partial layer of configuration

use retrier_core::constants::{DEFAULT_MAX, DEFAULT_MIN, DEFAULT_RETRIES, DEFAULT_SLEEP};
use serde::Deserialize;

/// A partially specified configuration layer.
///
/// Every field is optional so a layer only overrides what it actually sets.
/// The same shape is deserialized from the YAML file; unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub retries: Option<i64>,
    pub sleep: Option<String>,
    pub regex: Option<Vec<String>>,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl Settings {
    /// Built-in defaults, the lowest layer
    pub fn defaults() -> Self {
        Self {
            retries: Some(i64::from(DEFAULT_RETRIES)),
            sleep: Some(DEFAULT_SLEEP.to_string()),
            regex: Some(Vec::new()),
            min: Some(DEFAULT_MIN.to_string()),
            max: Some(DEFAULT_MAX.to_string()),
        }
    }

    /// Lay `higher` over `self`; any field `higher` sets wins
    #[must_use]
    pub fn merge(self, higher: Settings) -> Self {
        Self {
            retries: higher.retries.or(self.retries),
            sleep: higher.sleep.or(self.sleep),
            regex: higher.regex.or(self.regex),
            min: higher.min.or(self.min),
            max: higher.max.or(self.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
