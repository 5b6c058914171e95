//! # serde_ace
//!
//! A Serde-compatible codec for the AceSerializer text format (revision 1).
//!
//! ## What is AceSerializer?
//!
//! AceSerializer is the message format of the Lua AceSerializer-3.0 library,
//! used by World of Warcraft addons to exchange data over chat channels. A
//! message is a flat run of printable ASCII tokens that survives transports
//! which strip whitespace and control characters. See [`format`] for the
//! full wire description.
//!
//! ## Key Features
//!
//! - **7-bit clean**: strings are escaped with a small `~` alphabet; no
//!   control bytes or whitespace ever reach the wire
//! - **Exact floats**: numbers that do not survive 14-digit decimal text are
//!   sent as a binary mantissa/exponent pair and decode bit-identically
//! - **Lua tables**: one [`AceTable`] type for sequences and records, with
//!   integer keys shifted to Lua's 1-based indexing on the wire
//! - **Serde Compatible**: works with `#[derive(Serialize, Deserialize)]` types
//! - **Bounded**: table nesting is limited by [`AceOptions::max_depth`]
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_ace = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Values and Messages
//!
//! A message carries any number of values:
//!
//! ```rust
//! use serde_ace::{deserialize, serialize, AceValue};
//!
//! let values = vec![
//!     AceValue::from("a^b"),
//!     AceValue::from(42),
//!     AceValue::from(1.1234567890123321),
//!     AceValue::Nil,
//! ];
//!
//! let text = serialize(&values).unwrap();
//! assert_eq!(text, "^1^Sa~}b^N42^F5059599576362793^f-52^Z^^");
//!
//! assert_eq!(deserialize(&text).unwrap(), values);
//! ```
//!
//! ### Rust Types
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_ace::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     roles: Vec<String>,
//! }
//!
//! let user = User {
//!     id: 7,
//!     name: "Alice".to_string(),
//!     roles: vec!["tank".to_string()],
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "^1^T^Sid^N7^Sname^SAlice^Sroles^T^N1^Stank^t^t^^");
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Dynamic Values with ace! Macro
//!
//! ```rust
//! use serde_ace::{ace, AceValue};
//!
//! let data = ace!({
//!     "name": "Alice",
//!     "tags": ["rust", "lua"]
//! });
//!
//! if let AceValue::Table(table) = data {
//!     assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Types the Format Cannot Hold
//!
//! Timestamps, big integers and similar host types are projected onto an
//! integer, a float or a string through the [`Projection`] trait.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Nesting depth is bounded, so hostile input cannot overflow the stack
//! - Every failure is reported as an [`Error`]; nothing is decoded partially

pub mod de;
pub mod error;
pub mod escape;
pub mod float;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod project;
pub mod ser;
pub mod token;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, Result};
pub use map::{AceTable, Key};
pub use options::AceOptions;
pub use project::{project, serialize_projected, Projection};
pub use ser::{AceValueSerializer, Serializer};
pub use value::{AceValue, Number};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Encode `values` as one message.
///
/// # Errors
///
/// Returns an error if a table nests deeper than the default limit or holds
/// an integer key with no wire form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize(values: &[AceValue]) -> Result<String> {
    serialize_with_options(values, AceOptions::default())
}

/// Encode `values` as one message with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_ace::{ace, serialize_with_options, AceOptions, Error};
///
/// let nested = ace!([[1]]);
/// let options = AceOptions::new().with_max_depth(1);
/// assert_eq!(serialize_with_options(&[nested], options), Err(Error::TooDeep(1)));
/// ```
///
/// # Errors
///
/// See [`serialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_with_options(values: &[AceValue], options: AceOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.write_header();
    for value in values {
        serializer.write_value(value)?;
    }
    serializer.write_terminator();
    Ok(serializer.into_inner())
}

/// Decode every value of a message.
///
/// Transport noise (`0x01..=0x20`, `0x7F`) is removed first.
///
/// # Examples
///
/// ```rust
/// use serde_ace::{deserialize, AceValue};
///
/// let values = deserialize("^1^N1.#INF^B\r\n^^").unwrap();
/// assert_eq!(values, vec![AceValue::from(f64::INFINITY), AceValue::Bool(true)]);
/// ```
///
/// # Errors
///
/// Returns an error if the message is malformed. No values are returned in
/// that case.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize(text: &str) -> Result<Vec<AceValue>> {
    deserialize_with_options(text, AceOptions::default())
}

/// Decode every value of a message with custom options.
///
/// # Errors
///
/// See [`deserialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize_with_options(text: &str, options: AceOptions) -> Result<Vec<AceValue>> {
    let cleaned = token::strip_noise(text);
    Deserializer::with_options(&cleaned, options).parse_values()
}

/// Serialize any `T: Serialize` as a single-value message.
///
/// # Examples
///
/// ```rust
/// use serde_ace::to_string;
///
/// assert_eq!(to_string(&vec!["a", "b"]).unwrap(), "^1^T^N1^Sa^N2^Sb^t^^");
/// assert_eq!(to_string(&Some(2.456)).unwrap(), "^1^N2.456^^");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented, e.g. a map keyed by
/// floats.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, AceOptions::default())
}

/// Serialize any `T: Serialize` as a single-value message with custom options.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: AceOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    serialize_with_options(&[to_value(value)?], options)
}

/// Convert any `T: Serialize` to an `AceValue`.
///
/// # Examples
///
/// ```rust
/// use serde_ace::to_value;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_table());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<AceValue>
where
    T: ?Sized + Serialize,
{
    ser::to_ace_value(value)
}

/// Serialize any `T: Serialize` to a writer as a single-value message.
///
/// # Examples
///
/// ```rust
/// use serde_ace::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &true).unwrap();
/// assert_eq!(buffer, b"^1^B^^");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from an `AceValue`.
///
/// # Errors
///
/// Returns an error if the value does not have the shape `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: AceValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(de::AceValueDeserializer::new(value))
}

/// Deserialize an instance of type `T` from a message.
///
/// A message with one value deserializes as that value. Several values
/// deserialize as a sequence, so a tuple captures them in order, and an
/// empty message deserializes as unit.
///
/// # Examples
///
/// ```rust
/// use serde_ace::from_str;
///
/// let numbers: Vec<i32> = from_str("^1^T^N1^N10^N2^N20^t^^").unwrap();
/// assert_eq!(numbers, vec![10, 20]);
///
/// let (kind, count): (String, u32) = from_str("^1^Sarrows^N20^^").unwrap();
/// assert_eq!((kind.as_str(), count), ("arrows", 20));
/// ```
///
/// # Errors
///
/// Returns an error if the message is malformed or does not have the shape
/// `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let cleaned = token::strip_noise(s);
    let mut deserializer = Deserializer::from_str(&cleaned);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde_ace::from_reader;
/// use std::io::Cursor;
///
/// let flag: bool = from_reader(Cursor::new(b"^1^b^^")).unwrap();
/// assert!(!flag);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the message is
/// malformed, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, the message is
/// malformed, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        nickname: Option<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = User {
            id: 123,
            name: "Alice ^_^ ~".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            nickname: None,
        };

        let text = to_string(&user).unwrap();
        assert!(!text.contains(' '));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.get("x"), Some(&AceValue::Number(Number::Integer(1))));
        assert_eq!(table.get("y"), Some(&AceValue::Number(Number::Integer(2))));
    }

    #[test]
    fn test_from_value() {
        let point: Point = from_value(ace!({"x": 3, "y": 4})).unwrap();
        assert_eq!(point, Point { x: 3, y: 4 });
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_noise_is_ignored() {
        let point: Point = from_str("^1^T^Sx\n^N1 ^Sy^N2\t^t^^\r\n").unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        assert!(matches!(
            from_slice::<String>(b"^1^S\xff^^"),
            Err(Error::Custom(_))
        ));
    }

    #[test]
    fn test_writer_reports_io_errors() {
        struct Broken;

        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        assert!(matches!(to_writer(Broken, &1), Err(Error::Io(_))));
    }
}
