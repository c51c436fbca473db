use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Filter used when `RUST_LOG` is unset. Progress lines are printed to stdout
/// directly, so diagnostics stay quiet by default.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the tracing system
///
/// Diagnostics always go to stderr so they never interleave with the captured
/// output of the retried command. ANSI colours are only used on a terminal.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span for a single attempt of the retried command
pub fn attempt_span(attempt: u32, max_attempts: u32) -> Span {
    span!(Level::INFO, "attempt", attempt = %attempt, max_attempts = %max_attempts)
}
