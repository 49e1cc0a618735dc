#![forbid(unsafe_code)]

//! Render: escape-code scanning, cursor control, and text-area compositing.

pub mod compositor;
pub mod cursor;
pub mod escape;
pub mod measure;
pub mod output;

pub use compositor::{DrawOptions, TextArea};
pub use escape::EscapeToken;
pub use output::TerminalOutput;
