//! Error types for retrier operations

mod builders;
mod types;

pub use types::{Error, Result};
