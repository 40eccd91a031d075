//! Capture of `tracing` output for assertions on warnings.
//!
//! [`capture`] installs a plain-text `fmt` subscriber for the current thread
//! only, runs the closure, and returns its result together with everything
//! that was logged at `DEBUG` or above.
//!
//! # Examples
//!
//! ```
//! use test_helpers::logs;
//!
//! let ((), output) = logs::capture(|| tracing::warn!("NOT using a.toml"));
//! assert!(output.contains("NOT using a.toml"));
//! ```

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::Level;

/// Shared in-memory sink handed to the subscriber.
#[derive(Clone, Debug, Default)]
pub struct LogBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    /// Returns everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber and returns its captured output.
pub fn capture<F, R>(f: F) -> (R, String)
where
    F: FnOnce() -> R,
{
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
