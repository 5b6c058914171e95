//! Dynamic value representation for AceSerializer data.
//!
//! This module provides the [`AceValue`] enum, the closed set of kinds the
//! format can carry: nil, booleans, numbers, strings and tables.
//!
//! ## Core Types
//!
//! - [`AceValue`]: An enum representing any encodable value
//! - [`Number`]: An integer or a double; which wire form a number takes
//!   (plain decimal or exact mantissa/exponent pair) is decided by the encoder
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_ace::{ace, AceValue};
//!
//! let nil = AceValue::Nil;
//! let boolean = AceValue::from(true);
//! let number = AceValue::from(42);
//! let text = AceValue::from("hello");
//!
//! let table = ace!({
//!     "name": "Alice",
//!     "scores": [10, 20]
//! });
//! assert!(table.is_table());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use serde_ace::AceValue;
//! use std::convert::TryFrom;
//!
//! let value = AceValue::from(42);
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```

use crate::{AceTable, Key};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any value the format can carry.
///
/// # Examples
///
/// ```rust
/// use serde_ace::{AceValue, Number};
///
/// let nil = AceValue::Nil;
/// let num = AceValue::Number(Number::Integer(42));
/// let text = AceValue::String("hello".to_string());
///
/// assert!(nil.is_nil());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AceValue {
    #[default]
    Nil,
    Bool(bool),
    Number(Number),
    String(String),
    Table(AceTable),
}

/// A numeric value.
///
/// Integers and floats compare equal when they denote the same number, since
/// a whole float such as `3.0` is written as `^N3` and reads back as an
/// integer. NaN compares equal to NaN so decoded values can be checked
/// structurally.
///
/// # Examples
///
/// ```rust
/// use serde_ace::Number;
///
/// assert_eq!(Number::Integer(3), Number::Float(3.0));
/// assert_eq!(Number::Integer(42).as_i64(), Some(42));
/// assert_eq!(Number::Float(42.5).as_i64(), None);
/// assert_eq!(Number::Float(f64::INFINITY).as_f64(), f64::INFINITY);
/// ```
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it is whole and in range.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts a `u64` without losing precision.
    ///
    /// Values past `i64::MAX` become floats when a double holds them
    /// exactly; others yield `None`.
    #[must_use]
    pub fn from_u64(value: u64) -> Option<Number> {
        if let Ok(i) = i64::try_from(value) {
            return Some(Number::Integer(i));
        }
        let f = value as f64;
        (f < u64::MAX as f64 && f as u64 == value).then_some(Number::Float(f))
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Number::Integer(i), Number::Float(f)) | (Number::Float(f), Number::Integer(i)) => {
                Number::Float(*f).as_i64() == Some(*i)
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(value as i64)
                }
            }

            impl From<$ty> for AceValue {
                fn from(value: $ty) -> Self {
                    AceValue::Number(Number::Integer(value as i64))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl AceValue {
    /// Returns `true` if the value is nil.
    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, AceValue::Nil)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, AceValue::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, AceValue::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, AceValue::String(_))
    }

    /// Returns `true` if the value is a table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, AceValue::Table(_))
    }

    /// Name of the value's kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            AceValue::Nil => "nil",
            AceValue::Bool(_) => "boolean",
            AceValue::Number(Number::Integer(_)) => "integer",
            AceValue::Number(Number::Float(_)) => "float",
            AceValue::String(_) => "string",
            AceValue::Table(_) => "table",
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AceValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AceValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AceValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AceValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is a table, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&AceTable> {
        match self {
            AceValue::Table(table) => Some(table),
            _ => None,
        }
    }

    /// If the value is a table, returns a mutable reference to it. Otherwise returns `None`.
    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut AceTable> {
        match self {
            AceValue::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Renders the value in Lua table-constructor notation, for diagnostics.
///
/// ```rust
/// use serde_ace::ace;
///
/// assert_eq!(ace!(["a", nil, 3]).to_string(), r#"{[0]="a", [2]=3}"#);
/// ```
impl fmt::Display for AceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AceValue::Nil => write!(f, "nil"),
            AceValue::Bool(b) => write!(f, "{}", b),
            AceValue::Number(n) => write!(f, "{}", n),
            AceValue::String(s) => write!(f, "{:?}", s),
            AceValue::Table(table) => {
                write!(f, "{{")?;
                for (i, (key, value)) in table.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[{}]={}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for AceValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AceValue::Nil => serializer.serialize_unit(),
            AceValue::Bool(b) => serializer.serialize_bool(*b),
            AceValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            AceValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            AceValue::String(s) => serializer.serialize_str(s),
            AceValue::Table(table) if table.is_sequence() => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(table.len()))?;
                for index in 0..table.len() as i64 {
                    if let Some(element) = table.get(index) {
                        seq.serialize_element(element)?;
                    }
                }
                seq.end()
            }
            AceValue::Table(table) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (key, value) in table {
                    match key {
                        Key::Integer(i) => map.serialize_entry(i, value)?,
                        Key::String(s) => map.serialize_entry(s, value)?,
                    }
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for AceValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct AceValueVisitor;

        impl<'de> Visitor<'de> for AceValueVisitor {
            type Value = AceValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any AceSerializer value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(AceValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(AceValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Number::from_u64(value)
                    .map(AceValue::Number)
                    .ok_or_else(|| E::custom(format!("{} has no exact number form", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(AceValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(AceValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(AceValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(AceValue::Nil)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(AceValue::Nil)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut table = AceTable::new();
                let mut index = 0i64;
                while let Some(elem) = seq.next_element()? {
                    table.insert(index, elem);
                    index += 1;
                }
                Ok(AceValue::Table(table))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = AceTable::new();
                while let Some((key, value)) = map.next_entry::<AceValue, AceValue>()? {
                    let key = Key::try_from(key).map_err(<A::Error as de::Error>::custom)?;
                    table.insert(key, value);
                }
                Ok(AceValue::Table(table))
            }
        }

        deserializer.deserialize_any(AceValueVisitor)
    }
}

impl TryFrom<AceValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: AceValue) -> crate::Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| crate::Error::custom(format!("expected integer, found {}", value)))
    }
}

impl TryFrom<AceValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: AceValue) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::custom(format!("expected number, found {}", value)))
    }
}

impl TryFrom<AceValue> for bool {
    type Error = crate::Error;

    fn try_from(value: AceValue) -> crate::Result<Self> {
        match value {
            AceValue::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                value
            ))),
        }
    }
}

impl TryFrom<AceValue> for String {
    type Error = crate::Error;

    fn try_from(value: AceValue) -> crate::Result<Self> {
        match value {
            AceValue::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value
            ))),
        }
    }
}

impl From<bool> for AceValue {
    fn from(value: bool) -> Self {
        AceValue::Bool(value)
    }
}

impl From<f32> for AceValue {
    fn from(value: f32) -> Self {
        AceValue::Number(Number::Float(value as f64))
    }
}

impl From<f64> for AceValue {
    fn from(value: f64) -> Self {
        AceValue::Number(Number::Float(value))
    }
}

impl From<Number> for AceValue {
    fn from(value: Number) -> Self {
        AceValue::Number(value)
    }
}

impl From<String> for AceValue {
    fn from(value: String) -> Self {
        AceValue::String(value)
    }
}

impl From<&str> for AceValue {
    fn from(value: &str) -> Self {
        AceValue::String(value.to_string())
    }
}

impl From<Vec<AceValue>> for AceValue {
    fn from(value: Vec<AceValue>) -> Self {
        AceValue::Table(AceTable::from(value))
    }
}

impl From<AceTable> for AceValue {
    fn from(value: AceTable) -> Self {
        AceValue::Table(value)
    }
}

impl<T: Into<AceValue>> From<Option<T>> for AceValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AceValue::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(i64::try_from(AceValue::from(42)).unwrap(), 42);
        assert_eq!(i64::try_from(AceValue::from(42.0)).unwrap(), 42);
        assert!(i64::try_from(AceValue::from(42.5)).is_err());
        assert!(i64::try_from(AceValue::from("test")).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        assert_eq!(f64::try_from(AceValue::from(3.5)).unwrap(), 3.5);
        assert_eq!(f64::try_from(AceValue::from(42)).unwrap(), 42.0);
        assert_eq!(
            f64::try_from(AceValue::from(f64::INFINITY)).unwrap(),
            f64::INFINITY
        );
    }

    #[test]
    fn test_tryfrom_bool_and_string() {
        assert!(bool::try_from(AceValue::Bool(true)).unwrap());
        assert!(bool::try_from(AceValue::from(1)).is_err());
        assert_eq!(String::try_from(AceValue::from("hello")).unwrap(), "hello");
        assert!(String::try_from(AceValue::Nil).is_err());
    }

    #[test]
    fn test_number_equality() {
        assert_eq!(Number::Integer(3), Number::Float(3.0));
        assert_ne!(Number::Integer(3), Number::Float(3.5));
        assert_eq!(Number::Float(f64::NAN), Number::Float(f64::NAN));
        assert_ne!(Number::Integer(i64::MAX), Number::Float(i64::MAX as f64));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(AceValue::from(None::<i32>), AceValue::Nil);
        assert_eq!(AceValue::from(Some("x")), AceValue::from("x"));
    }

    #[test]
    fn test_display() {
        let mut table = AceTable::new();
        table.insert("name", AceValue::from("Ann"));
        table.insert(0, AceValue::Bool(false));
        assert_eq!(
            AceValue::Table(table).to_string(),
            r#"{["name"]="Ann", [0]=false}"#
        );
        assert_eq!(AceValue::Nil.to_string(), "nil");
        assert_eq!(AceValue::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_kind() {
        assert_eq!(AceValue::Nil.kind(), "nil");
        assert_eq!(AceValue::from(1).kind(), "integer");
        assert_eq!(AceValue::from(1.0).kind(), "float");
        assert_eq!(AceValue::Table(AceTable::new()).kind(), "table");
    }
}
