#![forbid(unsafe_code)]

//! Style: named SGR attributes and colors.
//!
//! [`StyleName`] is a closed table; each name maps to one `ESC [ n m`
//! sequence. [`style`] wraps text in the sequences of the given names, in
//! the order given, and closes with a reset. [`style_open`] leaves the style
//! running for whatever is written next.
//!
//! # Example
//!
//! ```
//! use stui_style::{StyleName, style, style_open};
//!
//! assert_eq!(
//!     style("x", &[StyleName::Bold, StyleName::Blue]),
//!     "\x1b[1m\x1b[34mx\x1b[0m"
//! );
//! assert_eq!(style_open("x", &[StyleName::Bold]), "\x1b[1mx");
//! ```

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

macro_rules! style_table {
    ($($(#[$doc:meta])* $variant:ident => $name:literal, $code:literal;)*) => {
        /// A named SGR attribute or color.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StyleName {
            $($(#[$doc])* $variant,)*
        }

        impl StyleName {
            /// Every style, in table order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// The canonical snake_case name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// The SGR parameter.
            #[must_use]
            pub const fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            /// The full control sequence.
            #[must_use]
            pub const fn sequence(self) -> &'static str {
                match self {
                    $(Self::$variant => concat!("\x1b[", $code, "m"),)*
                }
            }
        }
    };
}

style_table! {
    /// Clear every attribute.
    Reset => "reset", 0;
    Bold => "bold", 1;
    Dim => "dim", 2;
    Italic => "italic", 3;
    Underline => "underline", 4;
    /// Mostly honored by Windows consoles.
    SlowBlink => "slow_blink", 5;
    RapidBlink => "rapid_blink", 6;
    Strike => "strike", 9;
    /// Neither bold nor dim.
    NormalIntensity => "normal_intensity", 22;
    NotItalic => "not_italic", 23;
    NotUnderlined => "not_underlined", 24;
    NotBlinking => "not_blinking", 25;
    Black => "black", 30;
    Red => "red", 31;
    Green => "green", 32;
    Yellow => "yellow", 33;
    Blue => "blue", 34;
    Magenta => "magenta", 35;
    Cyan => "cyan", 36;
    White => "white", 37;
    BackgroundBlack => "background_black", 40;
    BackgroundRed => "background_red", 41;
    BackgroundGreen => "background_green", 42;
    BackgroundYellow => "background_yellow", 43;
    BackgroundBlue => "background_blue", 44;
    BackgroundMagenta => "background_magenta", 45;
    BackgroundCyan => "background_cyan", 46;
    BackgroundWhite => "background_white", 47;
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a name missing from the style table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown style: {:?}", self.0)
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for StyleName {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.name() == s)
            .ok_or_else(|| UnknownStyle(s.to_owned()))
    }
}

/// `(name, sequence)` for every style, in table order.
pub fn styles() -> impl Iterator<Item = (&'static str, &'static str)> {
    StyleName::ALL.iter().map(|s| (s.name(), s.sequence()))
}

/// `text` preceded by the sequences of `names` and followed by a reset.
#[must_use]
pub fn style(text: &str, names: &[StyleName]) -> String {
    let mut out = style_open(text, names);
    out.push_str(StyleName::Reset.sequence());
    out
}

/// `text` preceded by the sequences of `names`, left unterminated.
#[must_use]
pub fn style_open(text: &str, names: &[StyleName]) -> String {
    let prefix: usize = names.iter().map(|n| n.sequence().len()).sum();
    let mut out = String::with_capacity(prefix + text.len() + 4);
    for name in names {
        out.push_str(name.sequence());
    }
    out.push_str(text);
    out
}

/// Write the reset sequence.
pub fn reset_style<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(StyleName::Reset.sequence().as_bytes())
}
