/// Byte index of the `char_idx`-th character of `text`, clamped to `text.len()`.
pub(crate) fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(text.len())
}

/// Split `text` after its first `char_idx` characters.
pub(crate) fn split_at_char(text: &str, char_idx: usize) -> (&str, &str) {
    text.split_at(char_to_byte(text, char_idx))
}

/// Characters `start..end` of `text` (clamped to the end of the text).
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let start_byte = char_to_byte(text, start);
    let end_byte = start_byte + char_to_byte(&text[start_byte..], end.saturating_sub(start));
    &text[start_byte..end_byte]
}

/// Render `\r` and `\n` as escapes so a change prints on a single line.
pub(crate) fn escape_newlines(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}
