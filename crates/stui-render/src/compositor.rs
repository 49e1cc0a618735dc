#![forbid(unsafe_code)]

//! Text areas and the routine that draws them.
//!
//! A [`TextArea`] is a rectangle anchored at a 1-based `(column, row)` with
//! multi-line content. Drawing clips every row to the area width in
//! *visible* chars, so embedded control sequences never eat into the width
//! budget and are carried over intact.
//!
//! # Algorithm
//!
//! 1. Split the content on `'\n'`.
//! 2. Per row, strip the sequences and record their offsets
//!    ([`escape::split`]).
//! 3. Clip the plain text to `width` chars.
//! 4. Reinsert the tokens that still fit, last to first.
//! 5. Past the last content row, stop unless overwriting, in which case
//!    blank rows are drawn down to `height`.
//! 6. Every row is positioned absolutely at `(column, row + index)`.
//! 7. Overwriting pads each row with spaces to exactly `width`.
//! 8. One flush at the end, when requested.
//!
//! Rectangles are ordinary text areas whose content is a border drawing.

use std::io::{self, Write};

use crate::cursor;
use crate::escape;
use crate::measure::pad_visible;

/// A rectangular region of the terminal and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArea {
    /// 1-based column of the top-left cell.
    pub column: u16,
    /// 1-based row of the top-left cell.
    pub row: u16,
    /// Width in visible chars.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
    /// Rows separated by `'\n'`.
    pub text: String,
}

impl TextArea {
    /// Create a text area.
    ///
    /// # Panics
    ///
    /// Panics if the origin is not 1-based or either dimension is zero.
    pub fn new(column: u16, row: u16, width: u16, height: u16, text: impl Into<String>) -> Self {
        assert!(
            column >= 1 && row >= 1,
            "text area origin is 1-based, got ({column}, {row})"
        );
        assert!(
            width > 0 && height > 0,
            "text area needs a positive size, got {width}x{height}"
        );
        Self {
            column,
            row,
            width,
            height,
            text: text.into(),
        }
    }

    /// The same area with different content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// How a draw call behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    /// Pad every row to the full width and draw blank rows down to the
    /// area height, erasing whatever was there.
    pub overwrite: bool,
    /// Flush the writer once every row has been written.
    pub flush: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            flush: true,
        }
    }
}

impl DrawOptions {
    /// Overwriting draw, flushed.
    #[must_use]
    pub const fn overwrite() -> Self {
        Self {
            overwrite: true,
            flush: true,
        }
    }
}

/// Clip `row` to `width` visible chars, keeping every sequence that sits
/// at or before the cut.
#[must_use]
pub fn clip_row(row: &str, width: usize) -> String {
    let (plain, tokens) = escape::split(row);
    let cut = plain
        .char_indices()
        .nth(width)
        .map_or(plain.len(), |(index, _)| index);
    escape::reinsert(&plain[..cut], &tokens)
}

/// The rows a draw of `area` emits, without cursor positioning.
///
/// Row `i` of the result belongs at `(area.column, area.row + i)`.
#[must_use]
pub fn compose_rows(area: &TextArea, overwrite: bool) -> Vec<String> {
    let width = usize::from(area.width);
    let content: Vec<&str> = area.text.split('\n').collect();
    let mut rows = Vec::with_capacity(usize::from(area.height));
    for index in 0..usize::from(area.height) {
        if index == content.len() && !overwrite {
            break;
        }
        let row = content
            .get(index)
            .map(|text| clip_row(text, width))
            .unwrap_or_default();
        rows.push(if overwrite {
            pad_visible(&row, width)
        } else {
            row
        });
    }
    tracing::trace!(rows = rows.len(), overwrite, "composed text area");
    rows
}

/// Draw `area` at its origin.
pub fn draw_text_box<W: Write>(w: &mut W, area: &TextArea, opts: DrawOptions) -> io::Result<()> {
    for (offset, row) in (0u16..).zip(compose_rows(area, opts.overwrite)) {
        cursor::set_position(w, area.column, area.row.saturating_add(offset))?;
        w.write_all(row.as_bytes())?;
    }
    if opts.flush {
        w.flush()?;
    }
    Ok(())
}

/// Build a text area, draw it, and hand it back for later redraws.
///
/// # Panics
///
/// Panics on the same geometry as [`TextArea::new`].
pub fn draw_text<W: Write>(
    w: &mut W,
    column: u16,
    row: u16,
    width: u16,
    height: u16,
    text: impl Into<String>,
    opts: DrawOptions,
) -> io::Result<TextArea> {
    let area = TextArea::new(column, row, width, height, text);
    draw_text_box(w, &area, opts)?;
    Ok(area)
}

/// Border drawing that fills a `width` x `height` box.
///
/// ```
/// use stui_render::compositor::rectangle_text;
///
/// assert_eq!(rectangle_text(4, 3), ".--.\n|  |\n`--´");
/// ```
///
/// # Panics
///
/// Panics if either dimension is below 2.
#[must_use]
pub fn rectangle_text(width: u16, height: u16) -> String {
    assert!(
        width >= 2 && height >= 2,
        "rectangle needs at least 2x2 cells, got {width}x{height}"
    );
    let inner = usize::from(width - 2);
    let middle = usize::from(height - 2);
    let dashes = "-".repeat(inner);
    let mut text = String::with_capacity((usize::from(width) + 2) * usize::from(height));
    text.push('.');
    text.push_str(&dashes);
    text.push_str(".\n");
    for _ in 0..middle {
        text.push('|');
        text.extend(std::iter::repeat_n(' ', inner));
        text.push_str("|\n");
    }
    text.push('`');
    text.push_str(&dashes);
    text.push('´');
    text
}

/// Draw a rectangle border and return its area.
///
/// # Panics
///
/// Panics if the origin is not 1-based or either dimension is below 2.
pub fn draw_rectangle<W: Write>(
    w: &mut W,
    column: u16,
    row: u16,
    width: u16,
    height: u16,
    flush: bool,
) -> io::Result<TextArea> {
    let text = rectangle_text(width, height);
    draw_text(
        w,
        column,
        row,
        width,
        height,
        text,
        DrawOptions {
            overwrite: false,
            flush,
        },
    )
}
