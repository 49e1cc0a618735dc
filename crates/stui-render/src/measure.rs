#![forbid(unsafe_code)]

//! Visible-width measurement.
//!
//! Width is the number of chars left once control sequences are removed.
//! Wide glyphs count as one.

use crate::escape::find_sequences;

/// Number of visible chars in `text`.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut last = 0;
    for range in find_sequences(text) {
        width += text[last..range.start].chars().count();
        last = range.end;
    }
    width + text[last..].chars().count()
}

/// Index and visible width of the widest item.
///
/// The first of several equally wide items wins. `None` for no items.
pub fn longest_string<I, S>(items: I) -> Option<(usize, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| (index, visible_width(item.as_ref())))
        .fold(None, |best, (index, width)| match best {
            Some((_, best_width)) if best_width >= width => best,
            _ => Some((index, width)),
        })
}

/// `text` right-padded with spaces to `width` visible chars.
///
/// Text already that wide or wider is returned unchanged.
#[must_use]
pub fn pad_visible(text: &str, width: usize) -> String {
    let visible = visible_width(text);
    let mut out = String::with_capacity(text.len() + width.saturating_sub(visible));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(visible)));
    out
}
