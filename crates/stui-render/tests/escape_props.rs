//! Property tests for scanning and clipping.

use proptest::prelude::*;
use stui_render::compositor::{TextArea, clip_row, compose_rows};
use stui_render::escape::{EscapeToken, reinsert, scan, split, strip};
use stui_render::measure::visible_width;

/// Sequences the scanner must recognize.
fn sequence() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..108).prop_map(|n| format!("\x1b[{n}m")),
        (1u16..200, 1u16..200).prop_map(|(r, c)| format!("\x1b[{r};{c}H")),
        Just("\x1b[?25l".to_owned()),
        Just("\x1b[s".to_owned()),
        prop::sample::select(vec!['@', 'M', 'Z', '\\', '_']).prop_map(|c| format!("\x1b{c}")),
    ]
}

/// Plain text without escape bytes.
fn plain() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!é|-]{0,12}"
}

fn styled_row() -> impl Strategy<Value = (String, Vec<(usize, String)>)> {
    prop::collection::vec((plain(), sequence()), 0..6).prop_map(|parts| {
        let mut text = String::new();
        let mut expected = Vec::new();
        let mut plain_len = 0;
        for (chunk, seq) in parts {
            text.push_str(&chunk);
            plain_len += chunk.len();
            expected.push((plain_len, seq.clone()));
            text.push_str(&seq);
        }
        (text, expected)
    })
}

proptest! {
    #[test]
    fn reinsert_after_split_is_identity(text in any::<String>()) {
        let (plain, tokens) = split(&text);
        prop_assert_eq!(reinsert(&plain, &tokens), text);
    }

    #[test]
    fn reinsert_round_trips_with_escape_heavy_text(
        parts in prop::collection::vec(prop_oneof![plain(), sequence(), Just("\x1b".to_owned())], 0..10)
    ) {
        let text: String = parts.concat();
        prop_assert_eq!(reinsert(&strip(&text), &scan(&text)), text);
    }

    #[test]
    fn scan_finds_every_inserted_sequence((text, expected) in styled_row()) {
        let tokens = scan(&text);
        let expected: Vec<EscapeToken> = expected
            .into_iter()
            .map(|(offset, code)| EscapeToken::new(offset, code))
            .collect();
        prop_assert_eq!(tokens, expected);
    }

    #[test]
    fn clipped_rows_have_exact_visible_width((text, _) in styled_row(), width in 0usize..40) {
        let clipped = clip_row(&text, width);
        let visible = visible_width(&text);
        prop_assert_eq!(visible_width(&clipped), visible.min(width));
        prop_assert!(strip(&text).starts_with(&strip(&clipped)));
    }

    #[test]
    fn overwrite_rows_fill_the_width((text, _) in styled_row(), width in 1u16..40, height in 1u16..5) {
        let area = TextArea::new(1, 1, width, height, text);
        let rows = compose_rows(&area, true);
        prop_assert_eq!(rows.len(), usize::from(height));
        for row in rows {
            prop_assert_eq!(visible_width(&row), usize::from(width));
        }
    }
}
