//! Command execution and the retry loop for retrier
//!
//! [`SystemCommandRunner`] performs one attempt and classifies it;
//! [`RetryEngine`] decides whether to sleep and try again.

pub mod console;
pub mod engine;
pub mod runner;

pub use console::Console;
pub use engine::{EngineState, RetryEngine, RunReport};
pub use runner::{classify, CommandRunner, SystemCommandRunner};
