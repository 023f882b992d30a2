//! Sequential edit lists.
//!
//! Editors frequently report a change as a list of edits to be applied **one after another**,
//! where each edit's `start` refers to the document as it is at the moment that edit is
//! applied (multi-caret typing, find/replace-all, formatter output). A batch, by contrast,
//! expresses every change against the same base text. This module converts between the two.

use crate::change::TextChange;
use crate::compress::compress_text_change_batches;

/// A single edit in a sequential list, expressed in character offsets.
///
/// `start` is an offset in the document **at the time this edit is applied**; the deleted
/// range is the length of `deleted_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequentialEdit {
    /// Start character offset.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl SequentialEdit {
    /// Create an edit.
    pub fn new(
        start: usize,
        deleted_text: impl Into<String>,
        inserted_text: impl Into<String>,
    ) -> Self {
        Self {
            start,
            deleted_text: deleted_text.into(),
            inserted_text: inserted_text.into(),
        }
    }

    fn into_text_change(self) -> TextChange {
        TextChange::new(self.start, self.deleted_text, self.start, self.inserted_text)
    }
}

/// Collapse a sequential edit list into one batch against the initial document.
///
/// Edits may be in any order and may touch text inserted by earlier edits.
///
/// # Example
///
/// ```rust
/// use text_change::{SequentialEdit, TextChange, batch_from_sequential};
///
/// // "abc" -> "abcX" -> "YabcX"; each start refers to the text of that moment.
/// let batch = batch_from_sequential(&[
///     SequentialEdit::new(3, "", "X"),
///     SequentialEdit::new(0, "", "Y"),
/// ]);
/// assert_eq!(
///     batch,
///     vec![TextChange::new(0, "", 0, "Y"), TextChange::new(3, "", 4, "X")]
/// );
/// ```
pub fn batch_from_sequential(edits: &[SequentialEdit]) -> Vec<TextChange> {
    compress_text_change_batches(
        edits
            .iter()
            .cloned()
            .map(|edit| vec![edit.into_text_change()]),
    )
}

/// Expand a batch into edits that can be applied left to right.
///
/// Applying the edits in order reproduces the effect of the batch: when an edit is applied,
/// every change before it has already shifted the text, which is exactly what the batch's
/// `new_position` accounts for.
pub fn sequential_from_batch(batch: &[TextChange]) -> Vec<SequentialEdit> {
    batch
        .iter()
        .map(|change| {
            SequentialEdit::new(change.new_position(), change.old_text(), change.new_text())
        })
        .collect()
}
