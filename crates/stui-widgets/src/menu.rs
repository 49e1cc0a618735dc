#![forbid(unsafe_code)]

//! Rotating option menu.
//!
//! The highlighted row never moves: it is always the middle slot
//! (`len / 2`). Moving the selection rotates the whole option list through
//! that slot, so the option shown there *is* the selection.
//!
//! ```text
//!   Say Hi          down       Say Bye
//! < Say Bye >      ----->    < Text input >
//!   Text input                 Exit
//!   Exit                       Say Hi
//! ```

use std::collections::VecDeque;
use std::io::{self, Write};

use stui_core::event::{KeyEvent, KeyName};
use stui_render::compositor::{DrawOptions, TextArea, draw_text_box};
use stui_render::measure::{longest_string, pad_visible};

/// Extra columns around the longest label (`"< "` and `" >"`).
const MARKER_WIDTH: usize = 4;

/// A vertical menu drawn through a [`TextArea`].
#[derive(Debug, Clone)]
pub struct Menu {
    options: VecDeque<String>,
    slot: usize,
    longest: usize,
    area: TextArea,
}

impl Menu {
    /// Create a menu at `(column, row)` with `options[default]` selected.
    ///
    /// The backing area is `longest + 4` wide and one row taller than the
    /// option count. `default` wraps around the option count.
    ///
    /// # Panics
    ///
    /// Panics if `options` is empty or the origin is not 1-based.
    pub fn new<I, S>(column: u16, row: u16, options: I, default: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options: VecDeque<String> = options.into_iter().map(Into::into).collect();
        assert!(!options.is_empty(), "a menu needs at least one option");

        let len = options.len();
        let slot = len / 2;
        let longest = longest_string(&options).map_or(0, |(_, width)| width);
        let shift = (slot + len - default % len) % len;
        options.rotate_right(shift);

        let area = TextArea::new(
            column,
            row,
            to_u16(longest + MARKER_WIDTH),
            to_u16(len + 1),
            String::new(),
        );
        Self {
            options,
            slot,
            longest,
            area,
        }
    }

    /// Pull the origin in so the menu fits a `screen` of `(columns, lines)`.
    #[must_use]
    pub fn clamp_to_screen(mut self, screen: (u16, u16)) -> Self {
        let max_column = usize::from(screen.0).saturating_sub(self.longest + MARKER_WIDTH);
        let max_row = usize::from(screen.1).saturating_sub(self.options.len());
        self.area.column = self.area.column.min(to_u16(max_column)).max(1);
        self.area.row = self.area.row.min(to_u16(max_row)).max(1);
        self
    }

    /// Origin that roughly centers a menu of `options` on `screen`.
    pub fn centered_position<I, S>(screen: (u16, u16), options: I) -> (u16, u16)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let options: Vec<S> = options.into_iter().collect();
        let longest = longest_string(&options).map_or(0, |(_, width)| width);
        let column = (usize::from(screen.0) / 2).saturating_sub(longest + MARKER_WIDTH);
        let row = usize::from(screen.1).saturating_sub(options.len()) / 2;
        (to_u16(column).max(1), to_u16(row).max(1))
    }

    /// Select the option below the current one, wrapping at the end.
    pub fn next_option(&mut self) {
        self.options.rotate_left(1);
    }

    /// Select the option above the current one, wrapping at the start.
    pub fn previous_option(&mut self) {
        self.options.rotate_right(1);
    }

    /// The label in the selected slot.
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.options[self.slot]
    }

    /// Labels in display order, top to bottom.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(String::as_str)
    }

    /// The area the menu draws into.
    #[must_use]
    pub fn area(&self) -> &TextArea {
        &self.area
    }

    /// The menu content: every label padded to the area width, the selected
    /// one wrapped in `< >`.
    #[must_use]
    pub fn render_text(&self) -> String {
        let width = self.longest + MARKER_WIDTH;
        self.options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                if index == self.slot {
                    pad_visible(&format!("< {option} >"), width)
                } else {
                    pad_visible(option, width)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Redraw the whole menu, erasing the previous frame.
    pub fn draw<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.area.text = self.render_text();
        draw_text_box(w, &self.area, DrawOptions::overwrite())
    }

    /// React to one key.
    ///
    /// Up and down move the selection and redraw. Enter and space return the
    /// selected label without drawing. Anything else just redraws.
    pub fn update<W: Write>(&mut self, w: &mut W, event: &KeyEvent) -> io::Result<Option<String>> {
        match event {
            KeyEvent::Named(KeyName::Up) => self.previous_option(),
            KeyEvent::Named(KeyName::Down) => self.next_option(),
            event if event.is_confirm() => {
                tracing::debug!(selected = self.selected(), "menu option chosen");
                return Ok(Some(self.selected().to_owned()));
            }
            _ => {}
        }
        self.draw(w)?;
        Ok(None)
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Menu {
        Menu::new(1, 1, ["A", "B", "C"], 1)
    }

    #[test]
    fn default_lands_in_the_middle_slot() {
        assert_eq!(abc().selected(), "B");
        let menu = Menu::new(1, 1, ["A", "B", "C", "D"], 0);
        assert_eq!(menu.selected(), "A");
        assert_eq!(menu.options().collect::<Vec<_>>(), ["C", "D", "A", "B"]);
    }

    #[test]
    fn down_rotates_forward_and_wraps() {
        let mut menu = abc();
        menu.next_option();
        assert_eq!(menu.selected(), "C");
        menu.next_option();
        assert_eq!(menu.selected(), "A");
    }

    #[test]
    fn up_rotates_backward() {
        let mut menu = abc();
        menu.previous_option();
        assert_eq!(menu.selected(), "A");
    }

    #[test]
    fn out_of_range_default_wraps() {
        let menu = Menu::new(1, 1, ["A", "B", "C"], 4);
        assert_eq!(menu.selected(), "B");
    }

    #[test]
    fn area_is_sized_from_the_longest_label() {
        let menu = Menu::new(2, 3, ["Say Hi", "\x1b[1mSay Bye\x1b[0m", "Exit"], 0);
        let area = menu.area();
        assert_eq!((area.column, area.row), (2, 3));
        assert_eq!((area.width, area.height), (11, 4));
    }

    #[test]
    fn render_marks_the_selected_slot() {
        assert_eq!(abc().render_text(), "A    \n< B >\nC    ");
    }

    #[test]
    fn confirm_returns_selection_without_drawing() {
        let mut menu = abc();
        let mut out = Vec::new();
        let chosen = menu
            .update(&mut out, &KeyEvent::Named(KeyName::Enter))
            .unwrap();
        assert_eq!(chosen.as_deref(), Some("B"));
        assert_eq!(
            menu.update(&mut out, &KeyEvent::Char(' ')).unwrap().as_deref(),
            Some("B")
        );
        assert!(out.is_empty());
    }

    #[test]
    fn other_keys_redraw() {
        let mut menu = abc();
        let mut out = Vec::new();
        assert_eq!(menu.update(&mut out, &KeyEvent::Char('x')).unwrap(), None);
        let drawn = String::from_utf8(out).unwrap();
        assert_eq!(
            drawn,
            "\x1b[1;1HA    \x1b[2;1H< B >\x1b[3;1HC    \x1b[4;1H     "
        );
    }

    #[test]
    fn down_then_draw() {
        let mut menu = abc();
        let mut out = Vec::new();
        menu.update(&mut out, &KeyEvent::Named(KeyName::Down)).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("< C >"));
    }

    #[test]
    fn clamps_into_the_screen() {
        let menu = Menu::new(70, 30, ["Option one", "Two"], 0).clamp_to_screen((80, 24));
        assert_eq!((menu.area().column, menu.area().row), (66, 22));

        let tiny = Menu::new(5, 5, ["Option one", "Two"], 0).clamp_to_screen((4, 1));
        assert_eq!((tiny.area().column, tiny.area().row), (1, 1));
    }

    #[test]
    fn centered_position_uses_visible_width() {
        let opts = ["\x1b[31mSay Hi\x1b[0m", "Exit"];
        assert_eq!(Menu::centered_position((80, 24), opts), (30, 11));
        assert_eq!(Menu::centered_position((4, 1), opts), (1, 1));
    }

    #[test]
    #[should_panic(expected = "at least one option")]
    fn empty_menu_is_rejected() {
        let _ = Menu::new(1, 1, Vec::<String>::new(), 0);
    }
}
