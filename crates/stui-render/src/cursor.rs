#![forbid(unsafe_code)]

//! Cursor movement and visibility.
//!
//! Stateless emitters: every function writes its sequence and nothing else.
//! None of them flush, and none write a line break.
//!
//! | Movement | Letter | Sequence |
//! |----------|--------|----------|
//! | up / down | `A` / `B` | `ESC [ n A` |
//! | right / left | `C` / `D` | `ESC [ n C` |
//! | next / previous line | `E` / `F` | `ESC [ n E` (column reset to 1) |
//! | column | `G` | `ESC [ n G` |
//! | position | `H` | `ESC [ row ; column H` (1-based) |
//! | scroll up / down | `S` / `T` | `ESC [ n S` |
//! | save / load position | `s` / `u` | `ESC [ s` |

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Show cursor: `CSI ? 25 h`
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

/// Hide cursor: `CSI ? 25 l`
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";

/// The final letters of the cursor control sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Up,
    Down,
    Right,
    Left,
    NextLine,
    PreviousLine,
    Column,
    Position,
    ScrollUp,
    ScrollDown,
    SavePosition,
    LoadPosition,
}

impl Movement {
    /// Every movement in table order.
    pub const ALL: [Self; 12] = [
        Self::Up,
        Self::Down,
        Self::Right,
        Self::Left,
        Self::NextLine,
        Self::PreviousLine,
        Self::Column,
        Self::Position,
        Self::ScrollUp,
        Self::ScrollDown,
        Self::SavePosition,
        Self::LoadPosition,
    ];

    /// Final byte of the sequence.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Up => 'A',
            Self::Down => 'B',
            Self::Right => 'C',
            Self::Left => 'D',
            Self::NextLine => 'E',
            Self::PreviousLine => 'F',
            Self::Column => 'G',
            Self::Position => 'H',
            Self::ScrollUp => 'S',
            Self::ScrollDown => 'T',
            Self::SavePosition => 's',
            Self::LoadPosition => 'u',
        }
    }
}

/// One of the four relative directions accepted by [`shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The matching movement.
    #[must_use]
    pub const fn movement(self) -> Movement {
        match self {
            Self::Up => Movement::Up,
            Self::Down => Movement::Down,
            Self::Left => Movement::Left,
            Self::Right => Movement::Right,
        }
    }
}

/// Error for a direction name other than up, down, left, right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction: {:?}", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(UnknownDirection(s.to_owned())),
        }
    }
}

fn movement<W: Write>(w: &mut W, movement: Movement, amount: u16) -> io::Result<()> {
    write!(w, "\x1b[{amount}{}", movement.letter())
}

/// Move up `amount` rows, keeping the column.
pub fn up<W: Write>(w: &mut W, amount: u16) -> io::Result<()> {
    movement(w, Movement::Up, amount)
}

/// Move down `amount` rows, keeping the column.
pub fn down<W: Write>(w: &mut W, amount: u16) -> io::Result<()> {
    movement(w, Movement::Down, amount)
}

/// Move to the start of the line `amount` rows down.
pub fn next_line<W: Write>(w: &mut W, amount: u16) -> io::Result<()> {
    movement(w, Movement::NextLine, amount)
}

/// Move to the start of the line `amount` rows up.
pub fn previous_line<W: Write>(w: &mut W, amount: u16) -> io::Result<()> {
    movement(w, Movement::PreviousLine, amount)
}

/// Move `amount` cells in `direction`.
pub fn shift<W: Write>(w: &mut W, direction: Direction, amount: u16) -> io::Result<()> {
    movement(w, direction.movement(), amount)
}

/// Move to 1-based `column` on the current row.
pub fn column<W: Write>(w: &mut W, column: u16) -> io::Result<()> {
    movement(w, Movement::Column, column)
}

/// Scroll the page up by `amount` lines.
pub fn scroll_up<W: Write>(w: &mut W, amount: u16) -> io::Result<()> {
    movement(w, Movement::ScrollUp, amount)
}

/// Scroll the page down by `amount` lines.
pub fn scroll_down<W: Write>(w: &mut W, amount: u16) -> io::Result<()> {
    movement(w, Movement::ScrollDown, amount)
}

/// Remember the cursor position.
pub fn save_position<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\x1b[{}", Movement::SavePosition.letter())
}

/// Return to the remembered cursor position.
pub fn load_position<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "\x1b[{}", Movement::LoadPosition.letter())
}

/// Move to the 1-based cell `(column, row)`.
///
/// # Panics
///
/// Panics if either coordinate is 0.
pub fn set_position<W: Write>(w: &mut W, column: u16, row: u16) -> io::Result<()> {
    assert!(
        column >= 1 && row >= 1,
        "cursor position is 1-based, got ({column}, {row})"
    );
    write!(w, "\x1b[{row};{column}{}", Movement::Position.letter())
}

/// Show or hide the cursor.
pub fn set_visibility<W: Write>(w: &mut W, visible: bool) -> io::Result<()> {
    w.write_all(if visible { CURSOR_SHOW } else { CURSOR_HIDE })
}
