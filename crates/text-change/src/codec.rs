//! Compact binary form of changes and batches.
//!
//! Used to keep compressed undo elements small once they leave the hot path. Layout of one
//! change (all integers big-endian `u32`):
//!
//! ```text
//! old_position | new_position | old_text byte len | old_text UTF-8 | new_text byte len | new_text UTF-8
//! ```
//!
//! A batch is a `u32` change count followed by its changes.

use crate::change::TextChange;
use crate::error::CodecError;

const U32_LEN: usize = 4;

impl TextChange {
    /// Number of bytes [`TextChange::write_to`] appends.
    pub fn encoded_len(&self) -> usize {
        4 * U32_LEN + self.old_text().len() + self.new_text().len()
    }

    /// Append the binary form of this change to `out`.
    ///
    /// Fails with [`CodecError::PositionOverflow`] or [`CodecError::TextTooLong`] when a
    /// position or a text's byte length does not fit in a `u32`; `out` is left untouched in
    /// that case.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        let old_position = position_to_u32(self.old_position())?;
        let new_position = position_to_u32(self.new_position())?;
        let old_len = text_len_to_u32(self.old_text().len())?;
        let new_len = text_len_to_u32(self.new_text().len())?;

        out.reserve(self.encoded_len());
        out.extend_from_slice(&old_position.to_be_bytes());
        out.extend_from_slice(&new_position.to_be_bytes());
        out.extend_from_slice(&old_len.to_be_bytes());
        out.extend_from_slice(self.old_text().as_bytes());
        out.extend_from_slice(&new_len.to_be_bytes());
        out.extend_from_slice(self.new_text().as_bytes());
        Ok(())
    }

    /// Read one change starting at `offset`, returning it with the offset just past it.
    pub fn read_from(bytes: &[u8], offset: usize) -> Result<(TextChange, usize), CodecError> {
        let mut reader = Reader { bytes, offset };
        let old_position = reader.read_u32()? as usize;
        let new_position = reader.read_u32()? as usize;
        let old_text = reader.read_text()?;
        let new_text = reader.read_text()?;
        Ok((
            TextChange::new(old_position, old_text, new_position, new_text),
            reader.offset,
        ))
    }
}

/// Encode a whole batch.
pub fn encode_batch(batch: &[TextChange]) -> Result<Vec<u8>, CodecError> {
    let size = U32_LEN + batch.iter().map(TextChange::encoded_len).sum::<usize>();
    let mut out = Vec::with_capacity(size);
    let count = u32::try_from(batch.len()).map_err(|_| CodecError::TooManyChanges {
        count: batch.len(),
    })?;
    out.extend_from_slice(&count.to_be_bytes());
    for change in batch {
        change.write_to(&mut out)?;
    }
    Ok(out)
}

/// Decode a batch produced by [`encode_batch`]. The whole buffer must be consumed.
pub fn decode_batch(bytes: &[u8]) -> Result<Vec<TextChange>, CodecError> {
    let result = decode_batch_inner(bytes);
    if let Err(err) = &result {
        tracing::debug!(error = %err, len = bytes.len(), "failed to decode text change batch");
    }
    result
}

fn decode_batch_inner(bytes: &[u8]) -> Result<Vec<TextChange>, CodecError> {
    let mut reader = Reader { bytes, offset: 0 };
    let count = reader.read_u32()? as usize;

    // Every change needs at least 16 bytes; do not trust `count` for the allocation.
    let mut batch = Vec::with_capacity(count.min(bytes.len() / (4 * U32_LEN)));
    let mut offset = reader.offset;
    for _ in 0..count {
        let (change, next) = TextChange::read_from(bytes, offset)?;
        batch.push(change);
        offset = next;
    }

    if offset != bytes.len() {
        return Err(CodecError::TrailingBytes { offset });
    }
    Ok(batch)
}

fn position_to_u32(value: usize) -> Result<u32, CodecError> {
    u32::try_from(value).map_err(|_| CodecError::PositionOverflow { value })
}

fn text_len_to_u32(len: usize) -> Result<u32, CodecError> {
    u32::try_from(len).map_err(|_| CodecError::TextTooLong { len })
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let available = self.bytes.len().saturating_sub(self.offset);
        if available < len {
            return Err(CodecError::UnexpectedEof {
                offset: self.offset,
                needed: len - available,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        let mut buf = [0u8; U32_LEN];
        buf.copy_from_slice(self.take(U32_LEN)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn read_text(&mut self) -> Result<String, CodecError> {
        let len = self.read_u32()? as usize;
        let start = self.offset;
        let raw = self.take(len)?;
        std::str::from_utf8(raw)
            .map(str::to_string)
            .map_err(|_| CodecError::InvalidUtf8 { offset: start })
    }
}
