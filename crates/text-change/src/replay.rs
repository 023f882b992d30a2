//! Replaying edits and batches against text.
//!
//! These helpers are what round-trip checks are built on: a batch applied in the "do"
//! direction must produce the final text, and applied in the "undo" direction must restore the
//! base text. They splice a [`Rope`] by character index, so multi-byte text costs the same as
//! ASCII.

use ropey::Rope;

use crate::change::TextChange;
use crate::normalize::SingleEdit;

/// Apply `edits` (all expressed against `base`) and return the resulting text.
///
/// Edits are stable-sorted by offset and spliced from the last to the first, so the offsets of
/// earlier edits stay valid. Pure insertions (`length == 0`) and pure deletions (empty `text`)
/// are both supported.
///
/// # Panics
///
/// Panics if an edit reaches past the end of `base`. Use
/// [`text_changes_from_edits`](crate::text_changes_from_edits) to validate untrusted edits.
///
/// # Example
///
/// ```rust
/// use text_change::{SingleEdit, apply_edits};
///
/// let text = apply_edits(
///     "abcdefghij",
///     &[
///         SingleEdit::new(0, 3, "qh"),
///         SingleEdit::new(5, 0, "1"),
///         SingleEdit::new(8, 2, "X"),
///     ],
/// );
/// assert_eq!(text, "qhde1fghX");
/// ```
pub fn apply_edits(base: &str, edits: &[SingleEdit]) -> String {
    let mut sorted: Vec<&SingleEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| edit.offset);

    let mut rope = Rope::from_str(base);
    for edit in sorted.into_iter().rev() {
        splice(&mut rope, edit.offset, edit.length, &edit.text);
    }
    rope.to_string()
}

/// Apply `batch` to `rope`, which must hold the batch's old text.
///
/// # Panics
///
/// Panics if a change's old span reaches past the end of `rope`.
pub fn apply_text_changes(rope: &mut Rope, batch: &[TextChange]) {
    for change in batch.iter().rev() {
        splice(rope, change.old_position(), change.old_len(), change.new_text());
    }
}

/// Undo `batch` on `rope`, which must hold the batch's new text.
///
/// # Panics
///
/// Panics if a change's new span reaches past the end of `rope`.
pub fn revert_text_changes(rope: &mut Rope, batch: &[TextChange]) {
    for change in batch.iter().rev() {
        splice(rope, change.new_position(), change.new_len(), change.old_text());
    }
}

/// The "do" projection of a batch: edits against the old text.
pub fn do_edits(batch: &[TextChange]) -> Vec<SingleEdit> {
    batch
        .iter()
        .map(|change| SingleEdit::new(change.old_position(), change.old_len(), change.new_text()))
        .collect()
}

/// The "undo" projection of a batch: edits against the new text.
pub fn undo_edits(batch: &[TextChange]) -> Vec<SingleEdit> {
    batch
        .iter()
        .map(|change| SingleEdit::new(change.new_position(), change.new_len(), change.old_text()))
        .collect()
}

fn splice(rope: &mut Rope, offset: usize, length: usize, text: &str) {
    if length > 0 {
        rope.remove(offset..offset + length);
    }
    if !text.is_empty() {
        rope.insert(offset, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_edits_insert_and_delete() {
        assert_eq!(
            apply_edits("hello", &[SingleEdit::new(5, 0, "!"), SingleEdit::new(0, 1, "")]),
            "ello!"
        );
    }

    #[test]
    fn test_apply_edits_on_empty_text() {
        assert_eq!(apply_edits("", &[SingleEdit::new(0, 0, "h")]), "h");
        assert_eq!(apply_edits("", &[]), "");
    }

    #[test]
    fn test_apply_edits_multibyte() {
        assert_eq!(
            apply_edits("你好👋world", &[SingleEdit::new(2, 1, "!"), SingleEdit::new(3, 5, "")]),
            "你好!"
        );
    }

    #[test]
    fn test_same_offset_insertions_keep_order() {
        assert_eq!(
            apply_edits("ab", &[SingleEdit::new(1, 0, "X"), SingleEdit::new(1, 0, "Y")]),
            "aXYb"
        );
    }

    #[test]
    fn test_apply_then_revert_batch() {
        let batch = vec![
            TextChange::new(0, "ab", 0, ""),
            TextChange::new(4, "e", 2, "XY"),
        ];
        let mut rope = Rope::from_str("abcdef");
        apply_text_changes(&mut rope, &batch);
        assert_eq!(rope.to_string(), "cdXYf");

        revert_text_changes(&mut rope, &batch);
        assert_eq!(rope.to_string(), "abcdef");
    }

    #[test]
    #[should_panic]
    fn test_apply_edits_past_end_panics() {
        apply_edits("abc", &[SingleEdit::new(2, 5, "")]);
    }

    #[test]
    #[should_panic]
    fn test_revert_past_end_panics() {
        let mut rope = Rope::from_str("ab");
        revert_text_changes(&mut rope, &[TextChange::new(0, "", 1, "xyz")]);
    }

    #[test]
    fn test_projections() {
        let batch = vec![TextChange::new(1, "bc", 1, "Z")];
        assert_eq!(do_edits(&batch), vec![SingleEdit::new(1, 2, "Z")]);
        assert_eq!(undo_edits(&batch), vec![SingleEdit::new(1, 1, "bc")]);
    }
}
