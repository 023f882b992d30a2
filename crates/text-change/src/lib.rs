#![warn(missing_docs)]
//! Text Change - Compression of Consecutive Edit Batches
//!
//! # Overview
//!
//! `text-change` merges two consecutive batches of text edits into one batch with the same
//! net effect. It is the piece an undo stack uses to coalesce typing into a single undo step,
//! and the piece a sync layer uses to send one diff instead of many.
//!
//! Every [`TextChange`] records both the span it replaces in the text *before* its batch and
//! the span it occupies in the text *after* its batch, together with both texts. A compressed
//! batch therefore stays invertible: it can be replayed forwards ("do") and backwards ("undo")
//! without access to any intermediate text.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Sequential edits / binary codec            │  ← Interop
//! ├─────────────────────────────────────────────┤
//! │  Compressor (prev A→B + curr B→C = A→C)     │  ← Core algorithm
//! ├─────────────────────────────────────────────┤
//! │  Normalizer & batch checks                  │  ← Building batches
//! ├─────────────────────────────────────────────┤
//! │  TextChange (old/new coordinates + texts)   │  ← Data model
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use text_change::{
//!     SingleEdit, apply_edits, compress_consecutive_text_changes, do_edits, text_changes_from_edits,
//!     undo_edits,
//! };
//!
//! let base = "abcdefghij";
//! let first = [
//!     SingleEdit::new(0, 3, "qh"),
//!     SingleEdit::new(5, 0, "1"),
//!     SingleEdit::new(8, 2, "X"),
//! ];
//! let middle = apply_edits(base, &first);
//!
//! let second = [SingleEdit::new(1, 0, "Z"), SingleEdit::new(3, 3, "Y")];
//! let last = apply_edits(&middle, &second);
//! assert_eq!(last, "qZhdYghX");
//!
//! let prev = text_changes_from_edits(base, &first).unwrap();
//! let curr = text_changes_from_edits(&middle, &second).unwrap();
//! let compressed = compress_consecutive_text_changes(&prev, &curr);
//!
//! assert_eq!(apply_edits(base, &do_edits(&compressed)), last);
//! assert_eq!(apply_edits(&last, &undo_edits(&compressed)), base);
//! ```
//!
//! # Module Description
//!
//! - [`change`] - the [`TextChange`] value type
//! - [`normalize`] - building batches from `{offset, length, text}` edits, batch checks
//! - [`compress`] - the compressor
//! - [`replay`] - applying and reverting edits and batches on a [`ropey::Rope`]
//! - [`sequential`] - converting "apply one after another" edit lists to and from batches
//! - [`codec`] - compact binary form of batches
//!
//! # Units
//!
//! Offsets and lengths count characters (Unicode scalar values), never bytes.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`TextChange`], [`SingleEdit`] and
//!   [`SequentialEdit`].

pub mod change;
pub mod codec;
pub mod compress;
pub mod error;
pub mod normalize;
pub mod replay;
pub mod sequential;
mod text;

pub use change::TextChange;
pub use codec::{decode_batch, encode_batch};
pub use compress::{compress_consecutive_text_changes, compress_text_change_batches};
pub use error::{CodecError, TextChangeError};
pub use normalize::{
    SingleEdit, batch_len_delta, check_batch, check_batch_against, text_changes_from_edits,
};
pub use replay::{apply_edits, apply_text_changes, do_edits, revert_text_changes, undo_edits};
pub use sequential::{SequentialEdit, batch_from_sequential, sequential_from_batch};
