//! Error types.
//!
//! The compressor itself cannot fail. Errors only arise when edits are built from untrusted
//! `{offset, length, text}` triples, when a batch is validated, or when a batch is decoded from
//! its binary form.

use thiserror::Error;

/// A batch (or the edits it is built from) breaks one of the batch invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextChangeError {
    #[error("edit {index} covers {start}..{end}, past the end of the text ({len} chars)")]
    /// An edit reaches past the end of the text it is expressed against.
    OutOfBounds {
        /// Index of the offending edit.
        index: usize,
        /// Start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
        /// Character count of the text.
        len: usize,
    },

    #[error("edit {index} starts at {start}, before the previous edit starting at {previous_start}")]
    /// Edits are not sorted by old position.
    Unordered {
        /// Index of the offending edit.
        index: usize,
        /// Its start character offset.
        start: usize,
        /// Start of the edit before it.
        previous_start: usize,
    },

    #[error("edit {index} starts at {start}, inside the previous edit ending at {previous_end}")]
    /// An edit begins inside the span replaced by the previous edit.
    Overlapping {
        /// Index of the offending edit.
        index: usize,
        /// Its start character offset.
        start: usize,
        /// Exclusive end of the edit before it.
        previous_end: usize,
    },

    #[error("change {index} has new position {actual}, expected {expected}")]
    /// A change's new position disagrees with the cumulative delta of the changes before it.
    InconsistentNewPosition {
        /// Index of the offending change.
        index: usize,
        /// Position implied by the changes before it.
        expected: usize,
        /// Position stored in the change.
        actual: usize,
    },

    #[error("change {index} claims to replace {claimed:?} but the text has {actual:?}")]
    /// A change's old text is not the text found at its old position.
    OldTextMismatch {
        /// Index of the offending change.
        index: usize,
        /// `old_text` stored in the change.
        claimed: String,
        /// Text actually found at that span.
        actual: String,
    },
}

/// The binary form of a change or batch could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unexpected end of input at byte {offset}: {needed} more bytes needed")]
    /// The buffer ended in the middle of a record.
    UnexpectedEof {
        /// Byte offset where reading stopped.
        offset: usize,
        /// Number of bytes that were still required.
        needed: usize,
    },

    #[error("invalid UTF-8 in text starting at byte {offset}")]
    /// A text field did not hold valid UTF-8.
    InvalidUtf8 {
        /// Byte offset of the text field.
        offset: usize,
    },

    #[error("{offset} bytes consumed but the buffer is longer")]
    /// A batch decoded completely but bytes remained.
    TrailingBytes {
        /// Byte offset of the first unread byte.
        offset: usize,
    },

    #[error("position {value} does not fit in 32 bits")]
    /// An old or new position is too large for the encoding.
    PositionOverflow {
        /// The position that overflowed.
        value: usize,
    },

    #[error("text of {len} bytes is too long to encode")]
    /// An old or new text has a UTF-8 byte length that does not fit in 32 bits.
    TextTooLong {
        /// Byte length of the text.
        len: usize,
    },

    #[error("batch of {count} changes is too large to encode")]
    /// A batch holds more changes than its 32-bit count can express.
    TooManyChanges {
        /// Number of changes in the batch.
        count: usize,
    },
}
