//! Fixed-size transcript chunking.
//!
//! Long transcripts are split into fixed-size character chunks so each
//! request stays inside the hosted model's prompt-size limit. Splits happen
//! on char boundaries, never inside a multi-byte sequence.

/// Split `text` into chunks of at most `chunk_chars` characters.
///
/// Produces `ceil(len/chunk_chars)` chunks in input order; an empty input
/// produces no chunks.
pub fn chunk_text(text: &str, chunk_chars: usize) -> Vec<&str> {
    let chunk_chars = chunk_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == chunk_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_single_chunk() {
        let chunks = chunk_text("hello world", 1500);
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk_text("", 1500).is_empty());
    }

    #[test]
    fn chunk_count_is_ceil_of_length_over_size() {
        let text = "a".repeat(3200);
        let chunks = chunk_text(&text, 1500);
        // ceil(3200 / 1500) = 3
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 1500);
        assert_eq!(chunks[1].chars().count(), 1500);
        assert_eq!(chunks[2].chars().count(), 200);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let text = "b".repeat(3000);
        let chunks = chunk_text(&text, 1500);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.chars().count() == 1500));
    }

    #[test]
    fn chunks_preserve_order_and_content() {
        let text = "abcdefghij";
        let chunks = chunk_text(text, 3);
        assert_eq!(chunks, vec!["abc", "def", "ghi", "j"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn multibyte_characters_are_not_split() {
        // Each 'ü' is 2 bytes; chunking by chars must not cut inside one
        let text = "üüüüü";
        let chunks = chunk_text(text, 2);
        assert_eq!(chunks, vec!["üü", "üü", "ü"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn zero_chunk_size_is_clamped_to_one() {
        let chunks = chunk_text("abc", 0);
        assert_eq!(chunks, vec!["a", "b", "c"]);
    }
}
