#![forbid(unsafe_code)]

//! Widgets: a rotating option menu and a single-row text prompt.
//!
//! Both are driven one [`KeyEvent`](stui_core::event::KeyEvent) at a time and
//! draw through [`stui_render::compositor`].

pub mod menu;
pub mod text_input;

pub use menu::Menu;
pub use text_input::TextInput;
