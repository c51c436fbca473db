//! Configuration resolution for retrier
//!
//! Defaults, an optional YAML file, environment variables and command-line
//! flags are layered into one immutable [`Config`] at startup. Later layers
//! win: flag > environment > file > default.

pub mod config;
pub mod env;
pub mod loader;
pub mod settings;


pub use config::Config;
pub use env::EnvSource;
pub use loader::ConfigLoader;
pub use settings::Settings;
