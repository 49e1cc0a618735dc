#![forbid(unsafe_code)]

//! Single-row text prompt.
//!
//! Keys are fed in one at a time through [`TextInput::update`]; enter ends
//! the prompt and yields the typed string. Input longer than `max_width`
//! scrolls horizontally: the window follows the insertion point while typing
//! at the end, but moving left only scrolls back once the window would run
//! past the end of the text. The char under the insertion point is drawn
//! underlined, standing in for the cursor, at a column clamped to the
//! window; an insertion point left of the window is drawn over its first
//! cell.

use std::io::{self, Write};

use stui_core::event::{KeyEvent, KeyName};
use stui_render::compositor::{DrawOptions, TextArea, draw_text_box};
use stui_render::cursor;
use stui_style::{StyleName, style};

/// An in-progress text prompt.
#[derive(Debug, Clone)]
pub struct TextInput {
    area: TextArea,
    hide: bool,
    chars: Vec<char>,
    /// Insertion point, `0..=chars.len()`.
    cursor: usize,
    /// Chars scrolled off the left edge.
    draw_index: usize,
}

impl TextInput {
    /// Prompt at `(column, row)` showing at most `max_width` chars.
    ///
    /// With `hide` set nothing is drawn while typing.
    ///
    /// # Panics
    ///
    /// Panics if the origin is not 1-based or `max_width` is zero.
    pub fn new(column: u16, row: u16, max_width: u16, hide: bool) -> Self {
        Self {
            area: TextArea::new(column, row, max_width, 1, String::new()),
            hide,
            chars: Vec::new(),
            cursor: 0,
            draw_index: 0,
        }
    }

    /// Prompt that stretches to one column short of the right edge of a
    /// `screen` of `(columns, lines)`.
    pub fn fit_to_screen(column: u16, row: u16, screen: (u16, u16), hide: bool) -> Self {
        let max_width = screen.0.saturating_sub(column).saturating_sub(1).max(1);
        Self::new(column, row, max_width, hide)
    }

    /// The text typed so far.
    #[must_use]
    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Insertion point as a char index.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The area the visible window is drawn into.
    #[must_use]
    pub fn area(&self) -> &TextArea {
        &self.area
    }

    fn max_width(&self) -> usize {
        usize::from(self.area.width)
    }

    /// Apply one key.
    ///
    /// Returns the entered string on enter, after moving the terminal cursor
    /// to the start of the next row. Otherwise edits, redraws unless hidden,
    /// and returns `None`.
    pub fn update<W: Write>(&mut self, w: &mut W, event: &KeyEvent) -> io::Result<Option<String>> {
        match *event {
            KeyEvent::Named(KeyName::Enter) => {
                cursor::set_position(w, self.area.column, self.area.row.saturating_add(1))?;
                w.flush()?;
                return Ok(Some(self.value()));
            }
            KeyEvent::Named(KeyName::Backspace) => {
                if self.cursor > 0 {
                    self.chars.remove(self.cursor - 1);
                    self.cursor -= 1;
                }
            }
            KeyEvent::Named(KeyName::Right) => {
                self.cursor = (self.cursor + 1).min(self.chars.len());
            }
            KeyEvent::Named(KeyName::Left) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyEvent::Char(c) if !c.is_control() => {
                self.chars.insert(self.cursor, c);
                self.cursor += 1;
            }
            _ => {}
        }

        if !self.hide {
            self.draw(w)?;
        }
        Ok(None)
    }

    fn scroll(&mut self) {
        let width = self.max_width();
        let len = self.chars.len();
        // Follows the insertion point rightward; never scrolls past the text.
        let follow = (self.cursor + self.draw_index).saturating_sub(width);
        self.draw_index = follow.min(len.saturating_sub(width));
    }

    /// Draw the visible window and the underlined cursor cell.
    pub fn draw<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.scroll();
        let width = self.max_width();
        let end = (self.draw_index + width).min(self.chars.len());
        self.area.text = self.chars[self.draw_index..end].iter().collect();
        draw_text_box(
            w,
            &self.area,
            DrawOptions {
                overwrite: true,
                flush: false,
            },
        )?;

        let column = usize::from(self.area.column);
        let at = (column + self.cursor)
            .saturating_sub(self.draw_index)
            .clamp(column, width + column);
        cursor::set_position(w, u16::try_from(at).unwrap_or(u16::MAX), self.area.row)?;
        let under = self.chars.get(self.cursor).copied().unwrap_or(' ');
        w.write_all(style(under.encode_utf8(&mut [0; 4]), &[StyleName::Underline]).as_bytes())?;
        w.flush()
    }
}
