//! Tokenizing AceSerializer streams.
//!
//! A stream is a flat run of tokens. Each token is a control code (`^`
//! followed by one character) and a payload that runs until the next `^`:
//!
//! ```text
//! ^1 ^T ^N1 ^Sa ^t ^^
//! ```
//!
//! [`Tokenizer`] is a single-pass scanner over already cleaned text (see
//! [`strip_noise`]). It borrows the input, so cloning it is cheap and gives a
//! restartable cursor.
//!
//! ```rust
//! use serde_ace::token::{Control, Tokenizer};
//!
//! let tokens: Vec<_> = Tokenizer::new("^1^Sab^N42^^")
//!     .map(|t| (t.control, t.payload))
//!     .collect();
//!
//! assert_eq!(
//!     tokens,
//!     vec![
//!         (Control::Version, ""),
//!         (Control::String, "ab"),
//!         (Control::Number, "42"),
//!         (Control::Terminator, ""),
//!     ]
//! );
//! ```

use std::borrow::Cow;
use std::fmt;

const MARKER: char = '^';

/// The type code of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// `^1`, the revision marker opening every stream.
    Version,
    /// `^^`, closing every stream.
    Terminator,
    /// `^S`, an escaped string.
    String,
    /// `^N`, a plain decimal number or infinity sentinel.
    Number,
    /// `^F`, the mantissa half of an exact float.
    Mantissa,
    /// `^f`, the exponent half of an exact float.
    Exponent,
    /// `^B`
    True,
    /// `^b`
    False,
    /// `^Z`
    Nil,
    /// `^T`, opening a table.
    TableStart,
    /// `^t`, closing a table.
    TableEnd,
    /// Any other code.
    Unknown(char),
}

impl Control {
    /// Maps the character following `^` to its control code.
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        match ch {
            '1' => Control::Version,
            '^' => Control::Terminator,
            'S' => Control::String,
            'N' => Control::Number,
            'F' => Control::Mantissa,
            'f' => Control::Exponent,
            'B' => Control::True,
            'b' => Control::False,
            'Z' => Control::Nil,
            'T' => Control::TableStart,
            't' => Control::TableEnd,
            other => Control::Unknown(other),
        }
    }

    /// The character following `^` on the wire.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Control::Version => '1',
            Control::Terminator => '^',
            Control::String => 'S',
            Control::Number => 'N',
            Control::Mantissa => 'F',
            Control::Exponent => 'f',
            Control::True => 'B',
            Control::False => 'b',
            Control::Nil => 'Z',
            Control::TableStart => 'T',
            Control::TableEnd => 't',
            Control::Unknown(ch) => ch,
        }
    }

    /// The two-character wire form, e.g. `"^S"`.
    ///
    /// Unknown codes have no static form and yield `"^?"`; use `Display` for those.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Control::Version => "^1",
            Control::Terminator => "^^",
            Control::String => "^S",
            Control::Number => "^N",
            Control::Mantissa => "^F",
            Control::Exponent => "^f",
            Control::True => "^B",
            Control::False => "^b",
            Control::Nil => "^Z",
            Control::TableStart => "^T",
            Control::TableEnd => "^t",
            Control::Unknown(_) => "^?",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", MARKER, self.as_char())
    }
}

/// One control code and its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub control: Control,
    pub payload: &'a str,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.control, self.payload)
    }
}

/// Returns `true` for characters that transports inject or mangle and that
/// never occur in a well-formed stream.
#[inline]
#[must_use]
pub const fn is_noise(ch: char) -> bool {
    matches!(ch, '\u{1}'..='\u{20}' | '\u{7f}')
}

/// Removes every byte in `0x01..=0x20` and `0x7F` from `input`.
///
/// Escape sequences are built from printable characters only, so this never
/// damages a legitimate payload. Borrows the input when it is already clean.
///
/// # Examples
///
/// ```rust
/// use serde_ace::token::strip_noise;
///
/// assert_eq!(strip_noise("^1^Sa b\r\n^^"), "^1^Sab^^");
/// ```
#[must_use]
pub fn strip_noise(input: &str) -> Cow<'_, str> {
    if input.chars().any(is_noise) {
        Cow::Owned(input.chars().filter(|&ch| !is_noise(ch)).collect())
    } else {
        Cow::Borrowed(input)
    }
}

/// Lazy scanner yielding [`Token`]s.
///
/// Text before the first `^` is ignored, and a lone `^` at the very end of the
/// input ends the stream.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Tokenizer { input, position: 0 }
    }

    /// Rewinds to the start of the input.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Byte offset of the next unread character.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    fn finish(&mut self) -> Option<Token<'a>> {
        self.position = self.input.len();
        None
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.input[self.position..];

        // Expecting a control marker.
        let Some(marker) = rest.find(MARKER) else {
            return self.finish();
        };
        let Some(code) = rest[marker + 1..].chars().next() else {
            return self.finish();
        };

        // Reading the payload up to the next marker.
        let payload_start = marker + 1 + code.len_utf8();
        let payload_len = rest[payload_start..]
            .find(MARKER)
            .unwrap_or(rest.len() - payload_start);
        let payload = &rest[payload_start..payload_start + payload_len];

        self.position += payload_start + payload_len;

        Some(Token {
            control: Control::from_char(code),
            payload,
        })
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}
