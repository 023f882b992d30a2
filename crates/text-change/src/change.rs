//! The [`TextChange`] value type.
//!
//! A change carries both sides of one replacement: the span of the text *before* the batch it
//! belongs to (`old_position` + `old_text`) and the span of the text *after* the whole batch has
//! been applied (`new_position` + `new_text`). Keeping both sides makes every change invertible
//! without access to the buffer.
//!
//! All offsets and lengths are in characters (Unicode scalar values).

use std::fmt;

use crate::text::{escape_newlines, split_at_char};

/// One replacement, expressed in both the old and the new coordinate space.
///
/// Within a batch, changes are sorted by `old_position`, their old spans do not overlap, and
/// each `new_position` equals `old_position` plus the net length change of every change before
/// it. See [`check_batch`](crate::check_batch).
///
/// # Example
///
/// ```rust
/// use text_change::TextChange;
///
/// // "hello world" -> "hello there"
/// let change = TextChange::new(6, "world", 6, "there");
/// assert_eq!(change.old_end(), 11);
/// assert_eq!(change.len_delta(), 0);
/// assert_eq!(change.to_string(), "(replace@6 \"world\" with \"there\")");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextChange {
    old_position: usize,
    old_text: String,
    new_position: usize,
    new_text: String,
}

impl TextChange {
    /// Create a change. Callers are responsible for consistent offsets.
    pub fn new(
        old_position: usize,
        old_text: impl Into<String>,
        new_position: usize,
        new_text: impl Into<String>,
    ) -> Self {
        Self {
            old_position,
            old_text: old_text.into(),
            new_position,
            new_text: new_text.into(),
        }
    }

    /// Start of the replaced span in the old text.
    pub fn old_position(&self) -> usize {
        self.old_position
    }

    /// The exact text that was replaced.
    pub fn old_text(&self) -> &str {
        &self.old_text
    }

    /// Start of the inserted span in the new text.
    pub fn new_position(&self) -> usize {
        self.new_position
    }

    /// The exact text that was inserted.
    pub fn new_text(&self) -> &str {
        &self.new_text
    }

    /// Length of `old_text` in characters.
    pub fn old_len(&self) -> usize {
        self.old_text.chars().count()
    }

    /// Length of `new_text` in characters.
    pub fn new_len(&self) -> usize {
        self.new_text.chars().count()
    }

    /// Exclusive end of the replaced span in the old text.
    pub fn old_end(&self) -> usize {
        self.old_position + self.old_len()
    }

    /// Exclusive end of the inserted span in the new text.
    pub fn new_end(&self) -> usize {
        self.new_position + self.new_len()
    }

    /// Net change in character count (`new_len - old_len`).
    pub fn len_delta(&self) -> isize {
        self.new_len() as isize - self.old_len() as isize
    }

    /// Nothing is replaced, only inserted.
    pub fn is_insertion(&self) -> bool {
        self.old_text.is_empty()
    }

    /// Nothing is inserted, only removed.
    pub fn is_deletion(&self) -> bool {
        self.new_text.is_empty()
    }

    /// Replacing `old_text` with itself.
    pub fn is_no_op(&self) -> bool {
        self.old_text == self.new_text
    }

    /// The change that undoes this one: old and new sides swapped.
    ///
    /// Mapping a whole batch through `inverse` yields a valid batch that transforms the new
    /// text back into the old one.
    pub fn inverse(&self) -> TextChange {
        TextChange {
            old_position: self.new_position,
            old_text: self.new_text.clone(),
            new_position: self.old_position,
            new_text: self.old_text.clone(),
        }
    }

    /// Consume the change, returning `(old_position, old_text, new_position, new_text)`.
    pub fn into_parts(self) -> (usize, String, usize, String) {
        (
            self.old_position,
            self.old_text,
            self.new_position,
            self.new_text,
        )
    }

    /// Append `next`, whose old span starts where this one ends.
    pub(crate) fn absorb(&mut self, next: TextChange) {
        debug_assert_eq!(self.old_end(), next.old_position);
        self.old_text.push_str(&next.old_text);
        self.new_text.push_str(&next.new_text);
    }

    /// Split on the new side after `offset` characters of `new_text`.
    ///
    /// The head keeps the whole old span; the tail is a pure insertion at `old_end`.
    pub(crate) fn split_new_at(self, offset: usize) -> (TextChange, TextChange) {
        let old_end = self.old_end();
        let (head_text, tail_text) = split_at_char(&self.new_text, offset);
        let tail = TextChange {
            old_position: old_end,
            old_text: String::new(),
            new_position: self.new_position + offset,
            new_text: tail_text.to_string(),
        };
        let head = TextChange {
            old_position: self.old_position,
            new_position: self.new_position,
            new_text: head_text.to_string(),
            old_text: self.old_text,
        };
        (head, tail)
    }

    /// Split on the old side after `offset` characters of `old_text`.
    ///
    /// The head keeps the whole new text; the tail is a pure deletion at `new_end`.
    pub(crate) fn split_old_at(self, offset: usize) -> (TextChange, TextChange) {
        let new_end = self.new_end();
        let (head_text, tail_text) = split_at_char(&self.old_text, offset);
        let tail = TextChange {
            old_position: self.old_position + offset,
            old_text: tail_text.to_string(),
            new_position: new_end,
            new_text: String::new(),
        };
        let head = TextChange {
            old_position: self.old_position,
            old_text: head_text.to_string(),
            new_position: self.new_position,
            new_text: self.new_text,
        };
        (head, tail)
    }
}

impl fmt::Display for TextChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.old_text.is_empty() {
            write!(
                f,
                "(insert@{} \"{}\")",
                self.old_position,
                escape_newlines(&self.new_text)
            )
        } else if self.new_text.is_empty() {
            write!(
                f,
                "(delete@{} \"{}\")",
                self.old_position,
                escape_newlines(&self.old_text)
            )
        } else {
            write!(
                f,
                "(replace@{} \"{}\" with \"{}\")",
                self.old_position,
                escape_newlines(&self.old_text),
                escape_newlines(&self.new_text)
            )
        }
    }
}
