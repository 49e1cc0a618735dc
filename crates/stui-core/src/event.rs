#![forbid(unsafe_code)]

//! Canonical key event types.
//!
//! Every keypress that reaches the input queue is one [`KeyEvent`]: either a
//! [`KeyName`] resolved through a platform key table, or the literal
//! character the terminal delivered.
//!
//! # Design Notes
//!
//! - Names are the lowercase strings used by key tables and widgets
//!   (`"up"`, `"enter"`, ...). [`KeyName::as_str`] and `FromStr` convert
//!   between the two forms.
//! - The space bar is not a named key; it arrives as `KeyEvent::Char(' ')`.

use std::fmt;
use std::str::FromStr;

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// A key resolved through the platform key table.
    Named(KeyName),

    /// Any character not present in the key table, passed through verbatim.
    Char(char),
}

impl KeyEvent {
    /// Check if this is a specific named key.
    #[must_use]
    pub fn is(&self, name: KeyName) -> bool {
        matches!(self, Self::Named(n) if *n == name)
    }

    /// Check if this is a specific literal character.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Self::Char(ch) if *ch == c)
    }

    /// The character carried by a literal event.
    #[must_use]
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            Self::Named(_) => None,
        }
    }

    /// Whether this event confirms a choice (enter or space).
    #[must_use]
    pub fn is_confirm(&self) -> bool {
        self.is(KeyName::Enter) || self.is_char(' ')
    }
}

impl From<KeyName> for KeyEvent {
    fn from(name: KeyName) -> Self {
        Self::Named(name)
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name.as_str()),
            Self::Char(c) => write!(f, "{c:?}"),
        }
    }
}

/// Canonical names for the keys the decoders recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyName {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Enter/Return.
    Enter,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// A bare Escape press.
    Escape,
}

impl KeyName {
    /// All names, in key table order.
    pub const ALL: [Self; 8] = [
        Self::Enter,
        Self::Backspace,
        Self::Tab,
        Self::Escape,
        Self::Up,
        Self::Left,
        Self::Right,
        Self::Down,
    ];

    /// The canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Enter => "enter",
            Self::Backspace => "backspace",
            Self::Tab => "tab",
            Self::Escape => "escape",
        }
    }

    /// Whether this is one of the four arrow keys.
    #[must_use]
    pub const fn is_arrow(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that is not a canonical key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyName(pub String);

impl fmt::Display for UnknownKeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key name: {:?}", self.0)
    }
}

impl std::error::Error for UnknownKeyName {}

impl FromStr for KeyName {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownKeyName(s.to_owned()))
    }
}
