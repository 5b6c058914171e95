//! The `~` escape alphabet for string payloads.
//!
//! String payloads must survive text-only channels that mangle whitespace
//! and control characters, and must never contain the `^` that starts a
//! control code. Each unsafe byte is replaced by a two-byte sequence:
//!
//! | byte | sequence |
//! |------|----------|
//! | `0x1E` | `~z` |
//! | `0x00..=0x20` (other) | `~` followed by `byte + 64` |
//! | `^` (`0x5E`) | `~}` |
//! | `~` (`0x7E`) | `~\|` |
//! | `0x7F` | `~{` |
//!
//! All other bytes, including every byte of a multi-byte UTF-8 character,
//! pass through untouched.
//!
//! ```rust
//! use serde_ace::escape::{escape_str, unescape_str};
//!
//! let escaped = escape_str("a^b c");
//! assert_eq!(escaped, "a~}b~`c");
//! assert_eq!(unescape_str(&escaped).unwrap(), "a^b c");
//! ```

use crate::{Error, Result};
use std::borrow::Cow;

const MARKER: u8 = b'~';

/// Returns `true` if `byte` must be escaped inside a string payload.
#[inline]
#[must_use]
pub const fn needs_escape(byte: u8) -> bool {
    byte <= 0x20 || byte == b'^' || byte == b'~' || byte == 0x7F
}

/// Escapes a single unsafe byte.
///
/// # Errors
///
/// Returns [`Error::UnescapableByte`] for bytes outside the escapable set.
///
/// # Examples
///
/// ```rust
/// use serde_ace::escape::escape;
///
/// assert_eq!(escape(b'^').unwrap(), *b"~}");
/// assert_eq!(escape(b'\n').unwrap(), *b"~J");
/// assert!(escape(b'a').is_err());
/// ```
pub fn escape(byte: u8) -> Result<[u8; 2]> {
    let code = match byte {
        0x1E => b'z',
        0x00..=0x20 => byte + 64,
        b'^' => b'}',
        b'~' => b'|',
        0x7F => b'{',
        _ => return Err(Error::UnescapableByte(byte)),
    };
    Ok([MARKER, code])
}

/// Reverses [`escape`] for one two-byte sequence.
///
/// # Errors
///
/// Returns [`Error::UnknownEscapeSequence`] if the sequence has no mapping.
///
/// # Examples
///
/// ```rust
/// use serde_ace::escape::unescape;
///
/// assert_eq!(unescape(*b"~|").unwrap(), b'~');
/// assert_eq!(unescape(*b"~@").unwrap(), 0x00);
/// assert!(unescape(*b"~a").is_err());
/// ```
pub fn unescape(sequence: [u8; 2]) -> Result<u8> {
    let [marker, code] = sequence;
    if marker != MARKER {
        return Err(unknown(sequence));
    }
    match code {
        // 0x1E is always written as `~z`, so `~^` never appears.
        b'^' => Err(unknown(sequence)),
        0x40..=0x60 => Ok(code - 64),
        b'z' => Ok(0x1E),
        b'{' => Ok(0x7F),
        b'|' => Ok(b'~'),
        b'}' => Ok(b'^'),
        _ => Err(unknown(sequence)),
    }
}

fn unknown(sequence: [u8; 2]) -> Error {
    Error::unknown_escape(&String::from_utf8_lossy(&sequence))
}

/// Escapes every unsafe byte in `s`.
///
/// Borrows the input when nothing needs escaping.
#[must_use]
pub fn escape_str(s: &str) -> Cow<'_, str> {
    if !s.bytes().any(needs_escape) {
        return Cow::Borrowed(s);
    }

    let mut output = String::with_capacity(s.len() + 8);
    escape_into(&mut output, s);
    Cow::Owned(output)
}

/// Appends `s` to `output`, escaping every unsafe byte.
pub(crate) fn escape_into(output: &mut String, s: &str) {
    let mut start = 0;
    for (i, byte) in s.bytes().enumerate() {
        if !needs_escape(byte) {
            continue;
        }
        if let Ok([marker, code]) = escape(byte) {
            output.push_str(&s[start..i]);
            output.push(marker as char);
            output.push(code as char);
            start = i + 1;
        }
    }
    output.push_str(&s[start..]);
}

/// Decodes an escaped string payload.
///
/// # Errors
///
/// - [`Error::UnknownEscapeSequence`] for a `~` followed by an unmapped
///   character, or a `~` at the very end of the payload
/// - [`Error::UnescapableByte`] for an unsafe byte that appears unescaped
pub fn unescape_str(s: &str) -> Result<String> {
    let mut output = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == MARKER as char {
            match chars.next() {
                Some(code) if code.is_ascii() => {
                    output.push(unescape([MARKER, code as u8])? as char);
                }
                Some(code) => return Err(Error::unknown_escape(&format!("~{}", code))),
                None => return Err(Error::unknown_escape("~")),
            }
        } else if ch.is_ascii() && needs_escape(ch as u8) {
            return Err(Error::UnescapableByte(ch as u8));
        } else {
            output.push(ch);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_table() {
        assert_eq!(&escape(0x1E).unwrap(), b"~z");
        assert_eq!(&escape(0x00).unwrap(), b"~@");
        assert_eq!(&escape(b' ').unwrap(), b"~`");
        assert_eq!(&escape(b'\t').unwrap(), b"~I");
        assert_eq!(&escape(b'^').unwrap(), b"~}");
        assert_eq!(&escape(b'~').unwrap(), b"~|");
        assert_eq!(&escape(0x7F).unwrap(), b"~{");
    }

    #[test]
    fn test_escape_rejects_safe_bytes() {
        assert_eq!(escape(b'A'), Err(Error::UnescapableByte(b'A')));
        assert_eq!(escape(0x80), Err(Error::UnescapableByte(0x80)));
    }

    #[test]
    fn test_unescape_inverts_every_unsafe_byte() {
        for byte in (0u8..=0x7F).filter(|b| needs_escape(*b)) {
            assert_eq!(unescape(escape(byte).unwrap()).unwrap(), byte);
        }
    }

    #[test]
    fn test_unescape_rejects_unmapped() {
        assert!(matches!(
            unescape(*b"~^"),
            Err(Error::UnknownEscapeSequence(_))
        ));
        assert!(matches!(
            unescape(*b"~~"),
            Err(Error::UnknownEscapeSequence(_))
        ));
        assert!(matches!(
            unescape(*b"xA"),
            Err(Error::UnknownEscapeSequence(_))
        ));
    }

    #[test]
    fn test_escape_str_borrows_clean_input() {
        assert!(matches!(escape_str("plain"), Cow::Borrowed("plain")));
        assert_eq!(escape_str("a^b"), "a~}b");
        assert_eq!(escape_str("~~"), "~|~|");
    }

    #[test]
    fn test_unicode_passes_through() {
        assert_eq!(escape_str("caf\u{e9} \u{4f60}"), "caf\u{e9}~`\u{4f60}");
        assert_eq!(unescape_str("caf\u{e9}~`\u{4f60}").unwrap(), "caf\u{e9} \u{4f60}");
    }

    #[test]
    fn test_unescape_str_errors() {
        assert_eq!(unescape_str("abc~"), Err(Error::unknown_escape("~")));
        assert_eq!(unescape_str("a~\u{e9}"), Err(Error::unknown_escape("~\u{e9}")));
        assert_eq!(unescape_str("a\u{0}b"), Err(Error::UnescapableByte(0)));
    }
}
