// Chunk: docs/chunks/gap_buffer - Byte gap buffer with a gapped line-length index

//! Single-character UTF-8 decoding at arbitrary byte offsets.
//!
//! Every cursor operation on the gap buffer moves or deletes exactly one
//! encoded character. These helpers decode the character starting at, or
//! ending at, a byte offset of one contiguous region (the text before the gap
//! or the text after it) and never split a character.

use crate::error::DecodeError;

/// Maximum length of a UTF-8 sequence.
const MAX_SEQUENCE_LEN: usize = 4;

/// A decoded character and the number of bytes it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub ch: char,
    pub width: usize,
}

impl Decoded {
    pub fn is_newline(&self) -> bool {
        self.ch == '\n'
    }
}

/// Returns the sequence length announced by a lead byte, or `None` for bytes
/// that cannot start a sequence (continuation bytes, overlong leads, 0xF5..).
pub fn sequence_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decodes the character that starts at `offset`.
pub fn decode_at(bytes: &[u8], offset: usize) -> Result<Decoded, DecodeError> {
    let lead = *bytes.get(offset).ok_or(DecodeError::Truncated { offset })?;
    let width = sequence_width(lead).ok_or(DecodeError::InvalidLeadByte { offset, byte: lead })?;
    let sequence = bytes
        .get(offset..offset + width)
        .ok_or(DecodeError::Truncated { offset })?;
    let text =
        std::str::from_utf8(sequence).map_err(|source| DecodeError::Malformed { offset, source })?;
    let ch = text.chars().next().ok_or(DecodeError::Truncated { offset })?;
    Ok(Decoded { ch, width })
}

/// Decodes the character whose last byte is at `offset - 1`.
pub fn decode_before(bytes: &[u8], offset: usize) -> Result<Decoded, DecodeError> {
    if offset == 0 || offset > bytes.len() {
        return Err(DecodeError::NoCharacterBefore { offset });
    }

    let floor = offset.saturating_sub(MAX_SEQUENCE_LEN);
    let mut start = offset - 1;
    while start > floor && is_continuation(bytes[start]) {
        start -= 1;
    }

    let decoded = decode_at(&bytes[..offset], start)?;
    if start + decoded.width != offset {
        // Stray continuation bytes between the character and `offset`.
        return Err(DecodeError::NoCharacterBefore { offset });
    }
    Ok(decoded)
}

/// Counts the characters in `bytes`, which must hold whole characters only.
pub fn count_chars(bytes: &[u8]) -> Result<usize, DecodeError> {
    as_str(bytes).map(|text| text.chars().count())
}

/// Views `bytes` as text.
pub fn as_str(bytes: &[u8]) -> Result<&str, DecodeError> {
    std::str::from_utf8(bytes).map_err(|source| DecodeError::Malformed {
        offset: source.valid_up_to(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_width() {
        assert_eq!(sequence_width(b'a'), Some(1));
        assert_eq!(sequence_width(0xC3), Some(2));
        assert_eq!(sequence_width(0xE4), Some(3));
        assert_eq!(sequence_width(0xF0), Some(4));
        assert_eq!(sequence_width(0x80), None);
        assert_eq!(sequence_width(0xC0), None);
        assert_eq!(sequence_width(0xFF), None);
    }

    #[test]
    fn test_decode_at_ascii_and_multibyte() {
        let text = "a阿🙂\n".as_bytes();
        assert_eq!(decode_at(text, 0), Ok(Decoded { ch: 'a', width: 1 }));
        assert_eq!(decode_at(text, 1), Ok(Decoded { ch: '阿', width: 3 }));
        assert_eq!(decode_at(text, 4), Ok(Decoded { ch: '🙂', width: 4 }));
        assert!(decode_at(text, 8).unwrap().is_newline());
    }

    #[test]
    fn test_decode_before_multibyte() {
        let text = "a阿🙂".as_bytes();
        assert_eq!(decode_before(text, 8), Ok(Decoded { ch: '🙂', width: 4 }));
        assert_eq!(decode_before(text, 4), Ok(Decoded { ch: '阿', width: 3 }));
        assert_eq!(decode_before(text, 1), Ok(Decoded { ch: 'a', width: 1 }));
    }

    #[test]
    fn test_decode_before_start_fails() {
        assert_eq!(
            decode_before(b"abc", 0),
            Err(DecodeError::NoCharacterBefore { offset: 0 })
        );
    }

    #[test]
    fn test_decode_at_continuation_byte_fails() {
        let text = "阿".as_bytes();
        assert_eq!(
            decode_at(text, 1),
            Err(DecodeError::InvalidLeadByte {
                offset: 1,
                byte: text[1]
            })
        );
    }

    #[test]
    fn test_decode_at_truncated_sequence() {
        let text = &"阿".as_bytes()[..2];
        assert_eq!(decode_at(text, 0), Err(DecodeError::Truncated { offset: 0 }));
    }

    #[test]
    fn test_decode_at_malformed_sequence() {
        // Lead byte announces three bytes, second byte is ASCII.
        let err = decode_at(&[0xE4, b'a', b'b'], 0).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { offset: 0, .. }));
    }

    #[test]
    fn test_decode_before_stray_continuation() {
        // "a" followed by a lone continuation byte.
        let err = decode_before(&[b'a', 0x80], 2).unwrap_err();
        assert_eq!(err, DecodeError::NoCharacterBefore { offset: 2 });
    }

    #[test]
    fn test_count_chars() {
        assert_eq!(count_chars("My name is 阿保昭則.".as_bytes()), Ok(16));
        assert_eq!(count_chars(b""), Ok(0));
        assert!(count_chars(&[0xFF]).is_err());
    }
}
