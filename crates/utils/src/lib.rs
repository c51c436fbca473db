//! Shared utilities and pure functions for retrier
//!
//! This crate provides the helpers used throughout the retrier workspace:
//! Go-style duration strings and tracing initialisation.

pub mod duration;
pub mod tracing;

pub use duration::{format_duration, parse_duration, ParseDurationError};
