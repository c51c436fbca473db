use clap::Args;
use retrier_config::{Config, ConfigLoader, EnvSource, Settings};
use retrier_core::constants::EXECUTING_MESSAGE;
use retrier_core::{Error, Invocation, Result};
use retrier_exec::{Console, RetryEngine, RunReport, SystemCommandRunner};
use retrier_utils::format_duration;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Maximum number of attempts [default: 9] [env: RETRIES]
    #[arg(short = 'r', long, value_name = "N")]
    pub retries: Option<u32>,

    /// Delay between failed attempts, e.g. 5s or 250ms [default: 5s] [env: SLEEP]
    #[arg(short = 's', long, value_name = "DURATION")]
    pub sleep: Option<String>,

    /// Pattern marking an exit-code-1 failure as expected (repeatable) [env: REGEX]
    #[arg(long, value_name = "REGEX")]
    pub regex: Vec<String>,

    /// Reserved lower backoff bound [default: 10s] [env: MIN]
    #[arg(long, value_name = "DURATION")]
    pub min: Option<String>,

    /// Reserved upper backoff bound [default: 10s] [env: MAX]
    #[arg(long, value_name = "DURATION")]
    pub max: Option<String>,

    /// Path to config file [env: CONFIG]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Command to run, either as one quoted string or as separate arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl RunArgs {
    /// Settings given explicitly as flags
    pub fn flag_settings(&self) -> Settings {
        Settings {
            retries: self.retries.map(i64::from),
            sleep: self.sleep.clone(),
            regex: (!self.regex.is_empty()).then(|| self.regex.clone()),
            min: self.min.clone(),
            max: self.max.clone(),
        }
    }

    /// Resolve the configuration from flags, environment and config file
    pub fn load_config(&self, env: EnvSource) -> Result<Config> {
        let mut loader = ConfigLoader::new().env(env).flags(self.flag_settings());
        if let Some(path) = &self.config {
            loader = loader.config_file(path);
        }
        loader.load()
    }

    /// Resolve configuration, then retry the command until it settles
    pub async fn execute(self, console: Console) -> Result<RunReport> {
        let config = self.load_config(EnvSource::from_process())?;
        let invocation = Invocation::from_cli_args(&self.command).ok_or(Error::MissingCommand)?;

        let policy = config.retry_policy()?;
        let rules = config.match_rules()?;
        debug!(
            retries = config.retries,
            sleep = %format_duration(config.sleep),
            patterns = rules.len(),
            min = %format_duration(config.min),
            max = %format_duration(config.max),
            command = %invocation,
            "resolved configuration"
        );

        console.line(EXECUTING_MESSAGE);
        let runner = SystemCommandRunner::new(console.clone());
        let engine = RetryEngine::new(policy, rules, runner, console);
        Ok(engine.execute(&invocation).await)
    }
}
