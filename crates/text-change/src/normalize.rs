//! Building and validating edit batches.
//!
//! Producers usually describe an edit as a plain `{offset, length, text}` triple against the
//! current text. [`text_changes_from_edits`] orders those triples, rejects overlaps and turns
//! them into a batch of [`TextChange`]s with both coordinate spaces filled in.

use crate::change::TextChange;
use crate::error::TextChangeError;
use crate::text::char_slice;

/// A replacement of `length` characters at `offset` by `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleEdit {
    /// Start character offset.
    pub offset: usize,
    /// Number of characters replaced.
    pub length: usize,
    /// Replacement text (may be empty).
    pub text: String,
}

impl SingleEdit {
    /// Create an edit.
    pub fn new(offset: usize, length: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            text: text.into(),
        }
    }

    /// Exclusive end of the replaced span.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Turn edits against `base` into an ordered batch.
///
/// Edits are stable-sorted by offset, so insertions at the same offset keep their relative
/// order. Abutting edits are fine; an edit starting inside the previous one is not.
///
/// # Example
///
/// ```rust
/// use text_change::{SingleEdit, TextChange, text_changes_from_edits};
///
/// let changes = text_changes_from_edits(
///     "abcdef",
///     &[SingleEdit::new(4, 1, "XY"), SingleEdit::new(0, 2, "")],
/// )
/// .unwrap();
/// assert_eq!(
///     changes,
///     vec![TextChange::new(0, "ab", 0, ""), TextChange::new(4, "e", 2, "XY")]
/// );
/// ```
pub fn text_changes_from_edits(
    base: &str,
    edits: &[SingleEdit],
) -> Result<Vec<TextChange>, TextChangeError> {
    let base_len = base.chars().count();

    let mut order: Vec<usize> = (0..edits.len()).collect();
    order.sort_by_key(|&i| edits[i].offset);

    let mut changes = Vec::with_capacity(edits.len());
    let mut delta: isize = 0;
    let mut previous_end = 0;
    for &i in &order {
        let edit = &edits[i];
        if edit.end() > base_len {
            return Err(TextChangeError::OutOfBounds {
                index: i,
                start: edit.offset,
                end: edit.end(),
                len: base_len,
            });
        }
        if edit.offset < previous_end {
            return Err(TextChangeError::Overlapping {
                index: i,
                start: edit.offset,
                previous_end,
            });
        }

        let old_text = char_slice(base, edit.offset, edit.end());
        let new_position = edit.offset.saturating_add_signed(delta);
        changes.push(TextChange::new(
            edit.offset,
            old_text,
            new_position,
            edit.text.clone(),
        ));

        delta += edit.text.chars().count() as isize - edit.length as isize;
        previous_end = edit.end();
    }

    Ok(changes)
}

/// Check the structural batch invariants: ordered, non-overlapping old spans and new
/// positions consistent with the cumulative delta.
pub fn check_batch(batch: &[TextChange]) -> Result<(), TextChangeError> {
    let mut delta: isize = 0;
    for (index, change) in batch.iter().enumerate() {
        if let Some(previous) = index.checked_sub(1).map(|i| &batch[i]) {
            if change.old_position() < previous.old_position() {
                return Err(TextChangeError::Unordered {
                    index,
                    start: change.old_position(),
                    previous_start: previous.old_position(),
                });
            }
            if change.old_position() < previous.old_end() {
                return Err(TextChangeError::Overlapping {
                    index,
                    start: change.old_position(),
                    previous_end: previous.old_end(),
                });
            }
        }

        let expected = change.old_position().saturating_add_signed(delta);
        if change.new_position() != expected {
            return Err(TextChangeError::InconsistentNewPosition {
                index,
                expected,
                actual: change.new_position(),
            });
        }
        delta += change.len_delta();
    }
    Ok(())
}

/// [`check_batch`], plus every `old_text` must match `base` at its old span.
pub fn check_batch_against(base: &str, batch: &[TextChange]) -> Result<(), TextChangeError> {
    check_batch(batch)?;

    let base_len = base.chars().count();
    for (index, change) in batch.iter().enumerate() {
        if change.old_end() > base_len {
            return Err(TextChangeError::OutOfBounds {
                index,
                start: change.old_position(),
                end: change.old_end(),
                len: base_len,
            });
        }
        let actual = char_slice(base, change.old_position(), change.old_end());
        if actual != change.old_text() {
            return Err(TextChangeError::OldTextMismatch {
                index,
                claimed: change.old_text().to_string(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(())
}

/// Net change in character count caused by applying `batch`.
pub fn batch_len_delta(batch: &[TextChange]) -> isize {
    batch.iter().map(TextChange::len_delta).sum()
}
