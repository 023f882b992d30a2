//! Compression of consecutive edit batches.
//!
//! Given a batch `prev` turning text A into text B and a batch `curr` turning B into C,
//! [`compress_consecutive_text_changes`] produces one batch turning A directly into C. The
//! result keeps both sides of every change, so it can still be undone (C back to A) without
//! access to B.
//!
//! Both inputs meet in the coordinate space of B: `prev` changes occupy
//! `new_position..new_end` there, `curr` changes occupy `old_position..old_end`. The walk
//! below visits both batches in B order, splitting changes wherever they partially overlap, so
//! that every emitted piece is either untouched by the other batch or lines up exactly with a
//! piece of it.

use std::cmp::Ordering;

use crate::change::TextChange;
use crate::normalize::check_batch;

/// Combine `prev` (A → B) and `curr` (B → C) into one batch (A → C).
///
/// Neither input is modified. When `prev` is non-empty, changes in the result whose old spans
/// touch are joined, and changes that end up replacing text with identical text are dropped.
/// An empty `prev` returns `curr` as is, no-ops included.
///
/// Both batches must satisfy the batch invariants (see [`check_batch`]); in debug builds this
/// is asserted.
///
/// # Example
///
/// ```rust
/// use text_change::{TextChange, compress_consecutive_text_changes};
///
/// // "abc" -> "aXbc" -> "aXYbc"
/// let prev = vec![TextChange::new(1, "", 1, "X")];
/// let curr = vec![TextChange::new(2, "", 2, "Y")];
///
/// let compressed = compress_consecutive_text_changes(&prev, &curr);
/// assert_eq!(compressed, vec![TextChange::new(1, "", 1, "XY")]);
/// ```
pub fn compress_consecutive_text_changes(
    prev: &[TextChange],
    curr: &[TextChange],
) -> Vec<TextChange> {
    debug_assert!(check_batch(prev).is_ok(), "malformed prev batch: {prev:?}");
    debug_assert!(check_batch(curr).is_ok(), "malformed curr batch: {curr:?}");

    if prev.is_empty() {
        return curr.to_vec();
    }

    let compressed = Compressor::new(prev.len() + curr.len()).compress(prev, curr);
    tracing::trace!(
        prev = prev.len(),
        curr = curr.len(),
        compressed = compressed.len(),
        "compressed consecutive text changes"
    );
    compressed
}

/// Fold any number of consecutive batches into one.
///
/// Each batch must be expressed against the text produced by the one before it. An empty
/// iterator yields an empty batch.
pub fn compress_text_change_batches<I>(batches: I) -> Vec<TextChange>
where
    I: IntoIterator<Item = Vec<TextChange>>,
{
    batches.into_iter().fold(Vec::new(), |acc, batch| {
        compress_consecutive_text_changes(&acc, &batch)
    })
}

struct Compressor {
    result: Vec<TextChange>,
    /// Net length change of the `prev` pieces emitted so far (A → B).
    prev_delta: isize,
    /// Net length change of the `curr` pieces emitted so far (B → C).
    curr_delta: isize,
}

impl Compressor {
    fn new(capacity: usize) -> Self {
        Self {
            result: Vec::with_capacity(capacity),
            prev_delta: 0,
            curr_delta: 0,
        }
    }

    fn compress(mut self, prev: &[TextChange], curr: &[TextChange]) -> Vec<TextChange> {
        let mut prev_iter = prev.iter().cloned();
        let mut curr_iter = curr.iter().cloned();

        let mut prev_edit = prev_iter.next();
        let mut curr_edit = curr_iter.next();

        loop {
            match (prev_edit, curr_edit) {
                (None, None) => break,
                (None, Some(c)) => {
                    self.accept_curr(c);
                    prev_edit = None;
                    curr_edit = curr_iter.next();
                }
                (Some(p), None) => {
                    self.accept_prev(p);
                    prev_edit = prev_iter.next();
                    curr_edit = None;
                }
                (Some(p), Some(c)) => {
                    if c.old_end() <= p.new_position() {
                        // `c` lies entirely in B text before `p`.
                        self.accept_curr(c);
                        prev_edit = Some(p);
                        curr_edit = curr_iter.next();
                    } else if p.new_end() <= c.old_position() {
                        // `p` is untouched by `curr`.
                        self.accept_prev(p);
                        prev_edit = prev_iter.next();
                        curr_edit = Some(c);
                    } else if c.old_position() < p.new_position() {
                        let boundary = p.new_position() - c.old_position();
                        let (head, tail) = c.split_old_at(boundary);
                        self.accept_curr(head);
                        prev_edit = Some(p);
                        curr_edit = Some(tail);
                    } else if p.new_position() < c.old_position() {
                        let boundary = c.old_position() - p.new_position();
                        let (head, tail) = p.split_new_at(boundary);
                        self.accept_prev(head);
                        prev_edit = Some(tail);
                        curr_edit = Some(c);
                    } else {
                        // Both start at the same offset of B.
                        let (merge_prev, merge_curr) = match c.old_end().cmp(&p.new_end()) {
                            Ordering::Equal => {
                                prev_edit = prev_iter.next();
                                curr_edit = curr_iter.next();
                                (p, c)
                            }
                            Ordering::Less => {
                                let (head, tail) = p.split_new_at(c.old_len());
                                prev_edit = Some(tail);
                                curr_edit = curr_iter.next();
                                (head, c)
                            }
                            Ordering::Greater => {
                                let (head, tail) = c.split_old_at(p.new_len());
                                prev_edit = prev_iter.next();
                                curr_edit = Some(tail);
                                (p, head)
                            }
                        };
                        self.accept_merged(merge_prev, merge_curr);
                    }
                }
            }
        }

        remove_no_ops(join_abutting(self.result))
    }

    /// Emit a `curr` piece no `prev` change touches; its old side moves from B back to A.
    fn accept_curr(&mut self, change: TextChange) {
        self.curr_delta += change.len_delta();
        let (old_position, old_text, new_position, new_text) = change.into_parts();
        self.result.push(TextChange::new(
            old_position.saturating_add_signed(-self.prev_delta),
            old_text,
            new_position,
            new_text,
        ));
    }

    /// Emit a `prev` piece no `curr` change touches; its new side moves from B on to C.
    fn accept_prev(&mut self, change: TextChange) {
        self.prev_delta += change.len_delta();
        let (old_position, old_text, new_position, new_text) = change.into_parts();
        self.result.push(TextChange::new(
            old_position,
            old_text,
            new_position.saturating_add_signed(self.curr_delta),
            new_text,
        ));
    }

    /// Emit a `prev` piece whose B text is exactly what the `curr` piece replaces.
    fn accept_merged(&mut self, prev: TextChange, curr: TextChange) {
        self.prev_delta += prev.len_delta();
        self.curr_delta += curr.len_delta();
        let (old_position, old_text, _, _) = prev.into_parts();
        let (_, _, new_position, new_text) = curr.into_parts();
        self.result
            .push(TextChange::new(old_position, old_text, new_position, new_text));
    }
}

/// Join changes whose old spans touch into a single change.
fn join_abutting(changes: Vec<TextChange>) -> Vec<TextChange> {
    let mut joined: Vec<TextChange> = Vec::with_capacity(changes.len());
    for change in changes {
        if let Some(last) = joined.last_mut()
            && last.old_end() == change.old_position()
        {
            last.absorb(change);
            continue;
        }
        joined.push(change);
    }
    joined
}

fn remove_no_ops(mut changes: Vec<TextChange>) -> Vec<TextChange> {
    changes.retain(|change| !change.is_no_op());
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prev_returns_curr() {
        let curr = vec![TextChange::new(1, "b", 1, "B")];
        assert_eq!(compress_consecutive_text_changes(&[], &curr), curr);
    }

    #[test]
    fn test_empty_prev_keeps_no_op_in_curr() {
        let curr = vec![TextChange::new(3, "", 3, "")];
        assert_eq!(compress_consecutive_text_changes(&[], &curr), curr);
    }

    #[test]
    fn test_non_empty_prev_drops_no_op_in_curr() {
        // "abcd" -> "Xabcd" -> "Xabcd"
        let prev = vec![TextChange::new(0, "", 0, "X")];
        let curr = vec![TextChange::new(3, "", 3, "")];
        assert_eq!(compress_consecutive_text_changes(&prev, &curr), prev);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "malformed prev batch")]
    fn test_overlapping_prev_is_rejected() {
        let prev = vec![
            TextChange::new(0, "abc", 0, "X"),
            TextChange::new(2, "c", 1, "Y"),
        ];
        compress_consecutive_text_changes(&prev, &[]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "malformed prev batch")]
    fn test_unordered_prev_is_rejected() {
        let prev = vec![
            TextChange::new(4, "e", 4, "E"),
            TextChange::new(1, "b", 1, "B"),
        ];
        compress_consecutive_text_changes(&prev, &[]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "malformed curr batch")]
    fn test_inconsistent_curr_new_position_is_rejected() {
        let prev = vec![TextChange::new(0, "", 0, "X")];
        // The first change grows the text by one, so the second belongs at new position 6.
        let curr = vec![
            TextChange::new(1, "a", 1, "AA"),
            TextChange::new(5, "e", 5, "E"),
        ];
        compress_consecutive_text_changes(&prev, &curr);
    }

    #[test]
    fn test_empty_curr_returns_prev() {
        let prev = vec![
            TextChange::new(0, "a", 0, "AA"),
            TextChange::new(3, "", 4, "x"),
        ];
        assert_eq!(compress_consecutive_text_changes(&prev, &[]), prev);
    }

    #[test]
    fn test_disjoint_changes_are_rebased() {
        // "abcdef" -> "abXcdef" -> "abXcdeY"
        let prev = vec![TextChange::new(2, "", 2, "X")];
        let curr = vec![TextChange::new(6, "f", 6, "Y")];
        assert_eq!(
            compress_consecutive_text_changes(&prev, &curr),
            vec![
                TextChange::new(2, "", 2, "X"),
                TextChange::new(5, "f", 6, "Y"),
            ]
        );
    }

    #[test]
    fn test_curr_before_prev_shifts_prev_new_position() {
        // "abcdef" -> "abcdXf" -> "ZZbcdXf"
        let prev = vec![TextChange::new(4, "e", 4, "X")];
        let curr = vec![TextChange::new(0, "a", 0, "ZZ")];
        assert_eq!(
            compress_consecutive_text_changes(&prev, &curr),
            vec![
                TextChange::new(0, "a", 0, "ZZ"),
                TextChange::new(4, "e", 5, "X"),
            ]
        );
    }

    #[test]
    fn test_curr_replaces_inside_prev_insertion() {
        // "ab" -> "a123b" -> "a1Xb"
        let prev = vec![TextChange::new(1, "", 1, "123")];
        let curr = vec![TextChange::new(2, "23", 2, "X")];
        assert_eq!(
            compress_consecutive_text_changes(&prev, &curr),
            vec![TextChange::new(1, "", 1, "1X")]
        );
    }

    #[test]
    fn test_curr_deletes_prev_insertion_entirely() {
        // "ab" -> "aXYb" -> "ab"
        let prev = vec![TextChange::new(1, "", 1, "XY")];
        let curr = vec![TextChange::new(1, "XY", 1, "")];
        assert!(compress_consecutive_text_changes(&prev, &curr).is_empty());
    }

    #[test]
    fn test_curr_spans_across_prev() {
        // "abcdef" -> "abXef" -> "aQf"
        let prev = vec![TextChange::new(2, "cd", 2, "X")];
        let curr = vec![TextChange::new(1, "bXe", 1, "Q")];
        assert_eq!(
            compress_consecutive_text_changes(&prev, &curr),
            vec![TextChange::new(1, "bcde", 1, "Q")]
        );
    }

    #[test]
    fn test_adjacent_insertions_join() {
        // "" -> "h" -> "he"
        let prev = vec![TextChange::new(0, "", 0, "h")];
        let curr = vec![TextChange::new(1, "", 1, "e")];
        assert_eq!(
            compress_consecutive_text_changes(&prev, &curr),
            vec![TextChange::new(0, "", 0, "he")]
        );
    }

    #[test]
    fn test_batches_fold_in_order() {
        // "" -> "a" -> "ab" -> "b"
        let batches = vec![
            vec![TextChange::new(0, "", 0, "a")],
            vec![TextChange::new(1, "", 1, "b")],
            vec![TextChange::new(0, "a", 0, "")],
        ];
        assert_eq!(
            compress_text_change_batches(batches),
            vec![TextChange::new(0, "", 0, "b")]
        );
    }

    #[test]
    fn test_fold_of_nothing_is_empty() {
        assert!(compress_text_change_batches(Vec::<Vec<TextChange>>::new()).is_empty());
    }
}
