use pretty_assertions::assert_eq;
use text_change::{
    CodecError, SingleEdit, TextChange, compress_consecutive_text_changes, decode_batch,
    encode_batch, text_changes_from_edits,
};

#[test]
fn test_compressed_batch_survives_encoding() {
    let prev = text_changes_from_edits(
        "fn main() {\n}\n",
        &[SingleEdit::new(11, 0, "\n    println!(\"hi\");")],
    )
    .unwrap();
    let curr = text_changes_from_edits(
        "fn main() {\n    println!(\"hi\");\n}\n",
        &[SingleEdit::new(25, 2, "héllo 你好")],
    )
    .unwrap();
    let compressed = compress_consecutive_text_changes(&prev, &curr);

    let bytes = encode_batch(&compressed).unwrap();
    assert_eq!(
        bytes.len(),
        4 + compressed.iter().map(TextChange::encoded_len).sum::<usize>()
    );
    assert_eq!(decode_batch(&bytes).unwrap(), compressed);
}

#[test]
fn test_empty_batch_is_four_bytes() {
    let bytes = encode_batch(&[]).unwrap();
    assert_eq!(bytes, vec![0, 0, 0, 0]);
    assert!(decode_batch(&bytes).unwrap().is_empty());
}

#[test]
fn test_count_larger_than_payload() {
    // Claims a million changes but carries none.
    let bytes = vec![0x00, 0x0F, 0x42, 0x40];
    assert_eq!(
        decode_batch(&bytes).unwrap_err(),
        CodecError::UnexpectedEof {
            offset: 4,
            needed: 4,
        }
    );
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_position_overflow() {
    let change = TextChange::new(u32::MAX as usize + 1, "", 0, "x");
    let mut out = Vec::new();
    assert_eq!(
        change.write_to(&mut out).unwrap_err(),
        CodecError::PositionOverflow {
            value: u32::MAX as usize + 1,
        }
    );
    assert!(out.is_empty());
}
