#![forbid(unsafe_code)]

//! stui public facade crate.
//!
//! Re-exports the everyday types from the layer crates, adds one error type
//! covering both I/O and environment failures, and offers a prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use stui_core::error::Unavailable;
pub use stui_core::event::{KeyEvent, KeyName};
pub use stui_core::input_queue::{InputQueue, Take};
pub use stui_core::input_reader::{InputConfig, InputReader};
pub use stui_core::key_decoder::{
    ByteSource, KeyDecoder, KeyReader, KeySource, Platform, Utf8Source,
};
pub use stui_core::stop::{StopSignal, StopTrigger};
pub use stui_core::terminal_session::{SessionOptions, TerminalSession};

// --- Render re-exports -----------------------------------------------------

pub use stui_render::compositor::{DrawOptions, TextArea};
pub use stui_render::escape::EscapeToken;
pub use stui_render::output::TerminalOutput;

// --- Style / widget re-exports ---------------------------------------------

pub use stui_style::StyleName;
pub use stui_widgets::{Menu, TextInput};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for stui apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while reading keys or writing to the terminal.
    Io(std::io::Error),
    /// The environment could not provide something (terminal size, a key
    /// decoder for this platform).
    Unavailable(Unavailable),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Unavailable(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Unavailable(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<Unavailable> for Error {
    fn from(err: Unavailable) -> Self {
        Self::Unavailable(err)
    }
}

/// Standard result type for stui APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DrawOptions, Error, InputQueue, KeyEvent, KeyName, Menu, Result, StopSignal, StyleName,
        Take, TerminalOutput, TerminalSession, TextArea, TextInput,
    };

    pub use crate::{core, render, style, widgets};
}

pub use stui_core as core;
pub use stui_render as render;
pub use stui_style as style;
pub use stui_widgets as widgets;
