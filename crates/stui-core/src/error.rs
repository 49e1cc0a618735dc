#![forbid(unsafe_code)]

//! Environment unavailability.
//!
//! These are expected, non-fatal conditions: the terminal cannot report its
//! size, or the platform has no key decoder. They are returned to the caller
//! instead of panicking so it can fall back or show a message.

use std::fmt;
use std::io;

/// Something the environment could not provide.
#[derive(Debug)]
pub enum Unavailable {
    /// The terminal size query failed (not a tty, closed handle, ...).
    TerminalSize(io::Error),

    /// No key decoder exists for the running platform.
    UnsupportedPlatform(&'static str),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TerminalSize(err) => write!(f, "terminal size unavailable: {err}"),
            Self::UnsupportedPlatform(os) => {
                write!(f, "unsupported platform {os:?}: use a Windows or Unix system")
            }
        }
    }
}

impl std::error::Error for Unavailable {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TerminalSize(err) => Some(err),
            Self::UnsupportedPlatform(_) => None,
        }
    }
}
