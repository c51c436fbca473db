//! User-facing output sink
//!
//! Progress lines and the captured output of each attempt are written here,
//! not through `tracing`, so they reach stdout verbatim.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::warn;

/// Shared handle to the destination of user-facing output
#[derive(Clone)]
pub struct Console {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    /// Console writing to the process's standard output
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Console writing to an arbitrary writer
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Print one progress line
    pub fn line(&self, message: &str) {
        self.write_terminated(message.as_bytes());
    }

    /// Print the captured output of an attempt, followed by a newline
    pub fn output(&self, bytes: &[u8]) {
        self.write_terminated(bytes);
    }

    fn write_terminated(&self, bytes: &[u8]) {
        let mut writer = self.writer.lock();
        if let Err(e) = write_line(&mut *writer, bytes) {
            warn!(error = %e, "failed to write to console");
        }
    }
}

fn write_line(writer: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    writer.write_all(bytes)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

/// In-memory console destination for tests
#[cfg(test)]
#[derive(Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

#[cfg(test)]
impl CapturedOutput {
    /// A console paired with the buffer it writes into
    pub fn console() -> (Console, Self) {
        let captured = Self::default();
        (Console::from_writer(captured.clone()), captured)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
