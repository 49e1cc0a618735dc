#![forbid(unsafe_code)]

//! Core: key decoding, the input queue and its reader thread, and terminal
//! lifecycle.

pub mod error;
pub mod event;
pub mod input_queue;
pub mod input_reader;
pub mod key_decoder;
pub mod screen;
pub mod stop;
pub mod terminal_session;

pub use error::Unavailable;
pub use event::{KeyEvent, KeyName};
pub use input_queue::{InputQueue, Take};
pub use stop::{StopSignal, StopTrigger};
