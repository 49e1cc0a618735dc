#![forbid(unsafe_code)]

//! Serialized access to the terminal writer.
//!
//! Draw calls from different threads must not interleave their control
//! sequences. [`TerminalOutput`] is a cloneable handle around one writer;
//! each [`with`](TerminalOutput::with) call holds the lock for its whole
//! closure, so a multi-row draw lands on the terminal as one unit.

use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared, lock-protected writer.
#[derive(Debug)]
pub struct TerminalOutput<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for TerminalOutput<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl TerminalOutput<Stdout> {
    /// Handle over the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalOutput<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Run `f` with exclusive access to the writer.
    pub fn with<T>(&self, f: impl FnOnce(&mut W) -> io::Result<T>) -> io::Result<T> {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut writer)
    }

    /// Flush the writer.
    pub fn flush(&self) -> io::Result<()> {
        self.with(|w| w.flush())
    }

    /// Recover the writer if this is the last handle.
    pub fn into_inner(self) -> Option<W> {
        Arc::into_inner(self.inner)
            .map(|mutex| mutex.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}
