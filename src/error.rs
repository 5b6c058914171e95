//! Error types for AceSerializer encoding and decoding.
//!
//! Every failure is fatal to the current call: there are no partial results
//! and nothing is recovered silently. Each variant carries the offending
//! fragment of input so malformed messages can be diagnosed.
//!
//! ## Error Categories
//!
//! - **Escaping**: [`Error::UnescapableByte`], [`Error::UnknownEscapeSequence`]
//! - **Stream structure**: [`Error::MissingVersionMarker`], [`Error::MissingTerminator`],
//!   [`Error::InvalidControlCode`], [`Error::InvalidTable`]
//! - **Numbers**: [`Error::InvalidNumber`], [`Error::InvalidFloatPair`]
//! - **Value shape**: [`Error::InvalidMapKey`], [`Error::UnsupportedType`], [`Error::TooDeep`]
//!
//! ## Examples
//!
//! ```rust
//! use serde_ace::{deserialize, Error};
//!
//! let result = deserialize("^Sno header^^");
//! assert_eq!(result, Err(Error::MissingVersionMarker));
//!
//! if let Err(err) = deserialize("^1^Sunterminated") {
//!     eprintln!("Decode error: {}", err);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during AceSerializer encoding/decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A byte outside the escapable set was passed to the escaper, or an
    /// unsafe byte was found unescaped in a string payload.
    #[error("Unescapable character 0x{0:02X}")]
    UnescapableByte(u8),

    /// A `~` sequence with no mapping in the escape alphabet.
    #[error("Unknown escape sequence '{0}'")]
    UnknownEscapeSequence(String),

    /// A control code that is not valid at this position.
    #[error("Invalid AceSerializer control code '{0}'")]
    InvalidControlCode(String),

    /// The stream does not start with `^1`.
    #[error("Supplied data is not AceSerializer data (rev 1)")]
    MissingVersionMarker,

    /// Input ran out before the `^^` terminator or before a table's `^t`.
    #[error("Supplied data misses AceSerializer terminator ('^^'): {0}")]
    MissingTerminator(String),

    /// A `^N` payload that is neither a decimal number nor an infinity sentinel.
    #[error("Invalid serialized number: '{0}'")]
    InvalidNumber(String),

    /// A malformed `^F`/`^f` mantissa/exponent pair.
    #[error("Invalid serialized floating-point number: {0}")]
    InvalidFloatPair(String),

    /// A table key that is neither an integer nor a string.
    #[error("Invalid map key: {0}")]
    InvalidMapKey(String),

    /// A table whose tokens do not form key/value pairs.
    #[error("Invalid AceSerializer table format: {0}")]
    InvalidTable(String),

    /// A value kind with no encoding and no host projection.
    #[error("Cannot serialize a value of type {0}")]
    UnsupportedType(String),

    /// Table nesting exceeded the configured depth limit.
    #[error("Nesting too deep: exceeded maximum depth of {0}")]
    TooDeep(usize),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unknown escape sequence error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ace::Error;
    ///
    /// let err = Error::unknown_escape("~a");
    /// assert!(err.to_string().contains("'~a'"));
    /// ```
    pub fn unknown_escape(sequence: &str) -> Self {
        Error::UnknownEscapeSequence(sequence.to_string())
    }

    /// Creates an invalid control code error for a control character.
    pub fn invalid_control(control: impl fmt::Display) -> Self {
        Error::InvalidControlCode(control.to_string())
    }

    /// Creates a missing terminator error describing where input ran out.
    pub fn missing_terminator(context: &str) -> Self {
        Error::MissingTerminator(context.to_string())
    }

    /// Creates an invalid number error carrying the rejected payload.
    pub fn invalid_number(payload: &str) -> Self {
        Error::InvalidNumber(payload.to_string())
    }

    /// Creates an invalid float pair error.
    pub fn invalid_float_pair(msg: &str) -> Self {
        Error::InvalidFloatPair(msg.to_string())
    }

    /// Creates an invalid map key error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ace::Error;
    ///
    /// let err = Error::invalid_map_key("boolean");
    /// assert_eq!(err.to_string(), "Invalid map key: boolean");
    /// ```
    pub fn invalid_map_key(msg: &str) -> Self {
        Error::InvalidMapKey(msg.to_string())
    }

    /// Creates an invalid table format error.
    pub fn invalid_table(msg: &str) -> Self {
        Error::InvalidTable(msg.to_string())
    }

    /// Creates an unsupported type error for values that cannot be encoded.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ace::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescapable_byte_display() {
        let err = Error::UnescapableByte(0x41);
        assert_eq!(err.to_string(), "Unescapable character 0x41");
    }

    #[test]
    fn test_missing_terminator_display() {
        let err = Error::missing_terminator("inside table");
        assert!(err.to_string().contains("('^^')"));
        assert!(err.to_string().contains("inside table"));
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::de::Error>::custom("bad field");
        assert_eq!(err, Error::Custom("bad field".to_string()));
    }
}
