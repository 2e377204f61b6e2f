//! Stair layout: how a chain is drawn as a staircase.
//!
//! Each word is indented so that its overlapping letters sit directly under
//! the matching letters of the word above:
//!
//! ```text
//! zinger
//!    gerbil
//!       billy
//!          lysine
//!              nestle
//! ```
//!
//! Each row's letters are split into four spans so a renderer can colour them:
//!
//! | Span           | Letters                                                  |
//! |----------------|----------------------------------------------------------|
//! | `prev_overlap` | shared with the word above                                |
//! | `both_overlap` | shared with the words above *and* below (short words)     |
//! | `non_overlap`  | this word's own letters                                   |
//! | `next_overlap` | shared with the word below                                |
//!
//! The spans always concatenate back to the word, in that order.

use serde::{Deserialize, Serialize};

use crate::domain::overlap::overlap_count;

/// Display data for one row of the staircase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowLayout {
    /// Column at which the row starts (ignored when `right_align` is set).
    pub indent: usize,
    pub prev_overlap: String,
    pub both_overlap: String,
    pub non_overlap: String,
    pub next_overlap: String,
    /// Set on the last row of a chain that still has blank rows, so the end
    /// word is drawn flush right instead of at its (meaningless) indent.
    pub right_align: bool,
}

impl RowLayout {
    /// Reassembles the row's word from its spans.
    pub fn word(&self) -> String {
        [
            self.prev_overlap.as_str(),
            self.both_overlap.as_str(),
            self.non_overlap.as_str(),
            self.next_overlap.as_str(),
        ]
        .concat()
    }

    /// Number of characters in the row's word.
    pub fn len(&self) -> usize {
        [
            &self.prev_overlap,
            &self.both_overlap,
            &self.non_overlap,
            &self.next_overlap,
        ]
        .iter()
        .map(|s| s.chars().count())
        .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Running state carried from row to row.
#[derive(Default)]
struct StairState {
    total_length: usize,
    has_blanks: bool,
    rows: Vec<RowLayout>,
}

/// Lays out `words` as a staircase, one [`RowLayout`] per word.
///
/// Empty strings are unfilled slots: they produce empty spans and mark the
/// chain as incomplete, which right-aligns the final row.
pub fn layout_chain<S: AsRef<str>>(words: &[S]) -> Vec<RowLayout> {
    let last = words.len().saturating_sub(1);
    let initial = StairState {
        rows: Vec::with_capacity(words.len()),
        ..StairState::default()
    };

    let state = words.iter().enumerate().fold(initial, |mut state, (i, word)| {
        let word = word.as_ref();
        let prev = match i {
            0 => 0,
            _ => overlap_count(words[i - 1].as_ref(), word),
        };
        let next = match words.get(i + 1) {
            Some(following) => overlap_count(word, following.as_ref()),
            None => 0,
        };
        let len = word.chars().count();

        state.has_blanks |= word.is_empty();

        let mut row = split_spans(word, len, prev, next);
        row.indent = state.total_length.saturating_sub(prev);
        row.right_align = state.has_blanks && i == last;

        state.total_length += len.saturating_sub(prev);
        state.rows.push(row);
        state
    });

    state.rows
}

/// Splits `word` into its four spans given the overlaps with its neighbours.
///
/// When the two overlaps together are longer than the word they collide; the
/// collision region becomes `both_overlap` and `non_overlap` is empty.
fn split_spans(word: &str, len: usize, prev: usize, next: usize) -> RowLayout {
    let next_start = len - next;
    if prev + next > len {
        RowLayout {
            prev_overlap: slice_chars(word, 0, next_start),
            both_overlap: slice_chars(word, next_start, prev),
            non_overlap: String::new(),
            next_overlap: slice_chars(word, prev, len),
            ..RowLayout::default()
        }
    } else {
        RowLayout {
            prev_overlap: slice_chars(word, 0, prev),
            both_overlap: String::new(),
            non_overlap: slice_chars(word, prev, next_start),
            next_overlap: slice_chars(word, next_start, len),
            ..RowLayout::default()
        }
    }
}

/// Characters `start..end` of `word`.
fn slice_chars(word: &str, start: usize, end: usize) -> String {
    word.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

/// Renders rows as plain text, one line per row.
///
/// Rows are indented with spaces.  Right-aligned rows are padded so they end
/// at the right edge of the widest row.  Empty rows render as empty lines.
pub fn render_text(rows: &[RowLayout]) -> String {
    let width = rows
        .iter()
        .map(|row| if row.right_align { row.len() } else { row.indent + row.len() })
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|row| {
            if row.is_empty() {
                return String::new();
            }
            let pad = if row.right_align {
                width - row.len()
            } else {
                row.indent
            };
            format!("{}{}", " ".repeat(pad), row.word())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_CHAIN: [&str; 5] = ["zinger", "gerbil", "billy", "lysine", "nestle"];

    fn spans(row: &RowLayout) -> (&str, &str, &str, &str) {
        (
            &row.prev_overlap,
            &row.both_overlap,
            &row.non_overlap,
            &row.next_overlap,
        )
    }

    #[test]
    fn test_layout_has_one_row_per_word() {
        assert_eq!(layout_chain(&EXAMPLE_CHAIN).len(), 5);
        let empty: [&str; 0] = [];
        assert!(layout_chain(&empty).is_empty());
    }

    #[test]
    fn test_layout_example_chain_spans() {
        let rows = layout_chain(&EXAMPLE_CHAIN);
        assert_eq!(spans(&rows[0]), ("", "", "zin", "ger"));
        assert_eq!(spans(&rows[1]), ("ger", "", "", "bil"));
        assert_eq!(spans(&rows[2]), ("bil", "", "", "ly"));
        assert_eq!(spans(&rows[3]), ("ly", "", "si", "ne"));
        assert_eq!(spans(&rows[4]), ("ne", "", "stle", ""));
    }

    #[test]
    fn test_layout_example_chain_indents() {
        let indents: Vec<usize> = layout_chain(&EXAMPLE_CHAIN).iter().map(|r| r.indent).collect();
        assert_eq!(indents, vec![0, 3, 6, 9, 13]);
    }

    #[test]
    fn test_layout_last_word_without_successor_has_no_next_overlap() {
        let rows = layout_chain(&["gerbil", "billy"]);
        assert_eq!(spans(&rows[1]), ("bil", "", "ly", ""));
        assert_eq!(rows[1].indent, 3);
        assert!(!rows[1].right_align);
    }

    #[test]
    fn test_layout_colliding_overlaps_produce_both_span() {
        // "bcd" shares "bc" with the word above and "cd" with the word below.
        let rows = layout_chain(&["abc", "bcd", "cde"]);
        assert_eq!(spans(&rows[1]), ("b", "c", "", "d"));
        assert_eq!(rows[1].indent, 1);
        assert_eq!(rows[2].indent, 2);
    }

    #[test]
    fn test_layout_spans_reassemble_every_word() {
        let chains: [&[&str]; 4] = [
            &EXAMPLE_CHAIN,
            &["abc", "bcd", "cde"],
            &["zinger", "", "", "", "nestle"],
            &["", "", ""],
        ];
        for chain in chains {
            for (row, word) in layout_chain(chain).iter().zip(chain.iter()) {
                assert_eq!(row.word(), *word);
            }
        }
    }

    #[test]
    fn test_layout_blank_rows_right_align_the_last_row() {
        let rows = layout_chain(&["zinger", "gerbil", "", "", "nestle"]);
        assert_eq!(spans(&rows[2]), ("", "", "", ""));
        assert_eq!(rows[2].indent, 9);
        assert!(rows[4].right_align);
        assert!(rows.iter().take(4).all(|r| !r.right_align));
    }

    #[test]
    fn test_layout_complete_chain_is_not_right_aligned() {
        assert!(layout_chain(&EXAMPLE_CHAIN).iter().all(|r| !r.right_align));
    }

    #[test]
    fn test_layout_single_blank_word_right_aligns_itself() {
        let rows = layout_chain(&[""]);
        assert!(rows[0].right_align);
        assert_eq!(rows[0].indent, 0);
    }

    #[test]
    fn test_layout_is_repeatable() {
        let words = ["zinger", "gerbil", "", "lysine", "nestle"];
        assert_eq!(layout_chain(&words), layout_chain(&words));
    }

    #[test]
    fn test_layout_handles_multibyte_letters() {
        let rows = layout_chain(&["café", "éclair"]);
        assert_eq!(spans(&rows[0]), ("", "", "caf", "é"));
        assert_eq!(spans(&rows[1]), ("é", "", "clair", ""));
        assert_eq!(rows[1].indent, 3);
    }

    // ── render_text ───────────────────────────────────────────────────────────

    #[test]
    fn test_render_text_draws_staircase() {
        let text = render_text(&layout_chain(&EXAMPLE_CHAIN));
        let expected = [
            "zinger",
            "   gerbil",
            "      billy",
            "         lysine",
            "             nestle",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_right_aligns_end_word_of_incomplete_chain() {
        let text = render_text(&layout_chain(&["zinger", "gerbil", "", "", "nestle"]));
        let expected = ["zinger", "   gerbil", "", "", "   nestle"].join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_of_no_rows_is_empty() {
        assert_eq!(render_text(&[]), "");
    }
}
