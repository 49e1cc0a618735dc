#![forbid(unsafe_code)]

//! Screen queries and clearing.

use std::io::{self, Write};

use crate::error::Unavailable;

/// Terminal size as `(columns, lines)`.
///
/// A failed query (no tty, closed handle) is reported as
/// [`Unavailable::TerminalSize`] rather than a panic.
pub fn size() -> Result<(u16, u16), Unavailable> {
    crossterm::terminal::size().map_err(|err| {
        tracing::warn!(error = %err, "terminal size unavailable");
        Unavailable::TerminalSize(err)
    })
}

/// Clear the whole display and move the cursor to the top-left cell.
pub fn clear<W: Write>(w: &mut W) -> io::Result<()> {
    crossterm::queue!(
        w,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0)
    )?;
    w.flush()
}

/// Whether each coordinate of a 1-based `point` lies within `size`.
///
/// Returns `(column_fits, row_fits)`.
#[must_use]
pub fn point_within(point: (u16, u16), size: (u16, u16)) -> (bool, bool) {
    (
        (1..=size.0).contains(&point.0),
        (1..=size.1).contains(&point.1),
    )
}
