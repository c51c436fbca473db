//! Core domain types, errors, and constants for `retrier`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias shared by every crate in
//!   the workspace. Subprocess failures are never represented here; they are
//!   values of [`AttemptResult`].
//! - **`types`**: the command to run ([`Invocation`]), the retry bounds
//!   ([`RetryPolicy`]), the expected-failure patterns ([`MatchRules`]) and the
//!   per-attempt result ([`AttemptResult`]).
//! - **`constants`**: defaults and environment variable names.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
