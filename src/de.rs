//! AceSerializer decoding.
//!
//! This module provides the [`Deserializer`], which reads a token stream
//! back into [`AceValue`]s and, through `serde`, into any `T: Deserialize`.
//!
//! ## Overview
//!
//! - **Single pass**: tokens are pulled lazily from a [`Tokenizer`]; tables
//!   recurse, bounded by [`AceOptions::max_depth`]
//! - **Strict structure**: the stream must open with `^1` and close with `^^`;
//!   anything after the terminator is ignored
//! - **Message shape**: a stream with one value deserializes as that value,
//!   several values as a sequence, none as unit
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_ace::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str("^1^T^Sx^N1^Sy^N2^t^^").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//!
//! let (name, level): (String, u8) = from_str("^1^SAnn^N60^^").unwrap();
//! assert_eq!((name.as_str(), level), ("Ann", 60));
//! ```

use crate::escape::unescape_str;
use crate::float::{self, from_exact_pair};
use crate::token::{Control, Token, Tokenizer};
use crate::{AceOptions, AceTable, AceValue, Error, Key, Number, Result};
use serde::de::{self, Deserializer as _, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// The AceSerializer deserializer.
///
/// Expects input without transport noise (see [`crate::token::strip_noise`]);
/// the crate-level functions remove it before decoding.
/// Created via [`Deserializer::from_str`] or [`Deserializer::with_options`].
pub struct Deserializer<'de> {
    tokens: Tokenizer<'de>,
    options: AceOptions,
    depth: usize,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, AceOptions::default())
    }

    pub fn with_options(input: &'de str, options: AceOptions) -> Self {
        Deserializer {
            tokens: Tokenizer::new(input),
            options,
            depth: 0,
        }
    }

    /// Decodes every value of the stream, in order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingVersionMarker`] if the stream does not open
    /// with `^1`, with [`Error::MissingTerminator`] if it ends before `^^`,
    /// and with the matching error for the first malformed value.
    pub fn parse_values(&mut self) -> Result<Vec<AceValue>> {
        match self.tokens.next() {
            Some(token) if token.control == Control::Version => {}
            _ => return Err(Error::MissingVersionMarker),
        }

        let mut values = Vec::new();
        loop {
            let token = self.tokens.next().ok_or_else(|| {
                Error::missing_terminator(&format!("input ended after {} values", values.len()))
            })?;
            if token.control == Control::Terminator {
                return Ok(values);
            }
            values.push(self.parse_value(token)?);
        }
    }

    fn parse_value(&mut self, token: Token<'de>) -> Result<AceValue> {
        match token.control {
            Control::Nil => Ok(AceValue::Nil),
            Control::True => Ok(AceValue::Bool(true)),
            Control::False => Ok(AceValue::Bool(false)),
            Control::String => Ok(AceValue::String(unescape_str(token.payload)?)),
            Control::Number => parse_number(token.payload).map(AceValue::Number),
            Control::Mantissa => self.parse_float_pair(token.payload),
            Control::TableStart => self.parse_table(),
            _ => Err(Error::invalid_control(token.control)),
        }
    }

    fn parse_float_pair(&mut self, mantissa: &str) -> Result<AceValue> {
        let exponent = self
            .tokens
            .next()
            .filter(|token| token.control == Control::Exponent)
            .ok_or_else(|| {
                Error::invalid_float_pair(&format!("mantissa '{}' is not followed by ^f", mantissa))
            })?
            .payload;

        let m: f64 = mantissa
            .parse()
            .map_err(|_| Error::invalid_float_pair(&format!("bad mantissa '{}'", mantissa)))?;
        let e: i32 = exponent
            .parse()
            .map_err(|_| Error::invalid_float_pair(&format!("bad exponent '{}'", exponent)))?;
        if m == 0.0 || e == 0 {
            return Err(Error::invalid_float_pair(&format!(
                "zero component in ^F{}^f{}",
                mantissa, exponent
            )));
        }

        Ok(AceValue::Number(Number::Float(from_exact_pair(m, e))))
    }

    fn parse_table(&mut self) -> Result<AceValue> {
        self.depth += 1;
        let result = if self.depth > self.options.max_depth {
            Err(Error::TooDeep(self.options.max_depth))
        } else {
            self.parse_entries()
        };
        self.depth -= 1;
        result
    }

    fn parse_entries(&mut self) -> Result<AceValue> {
        let mut table = AceTable::new();
        loop {
            let token = self.next_in_table()?;
            if token.control == Control::TableEnd {
                break;
            }
            let key = match self.parse_value(token)? {
                AceValue::Nil => return Err(Error::invalid_table("nil key")),
                other => Key::try_from(other)?,
            };
            let key = match key {
                Key::Integer(i) => Key::Integer(i.checked_sub(1).ok_or_else(|| {
                    Error::invalid_map_key(&format!("integer key {} out of range", i))
                })?),
                key => key,
            };

            let token = self.next_in_table()?;
            if token.control == Control::TableEnd {
                return Err(Error::invalid_table(&format!("key {} has no value", key)));
            }
            let value = self.parse_value(token)?;
            if value.is_nil() {
                return Err(Error::invalid_table(&format!("nil value for key {}", key)));
            }
            table.insert(key, value);
        }

        Ok(AceValue::Table(table))
    }

    fn next_in_table(&mut self) -> Result<Token<'de>> {
        match self.tokens.next() {
            None => Err(Error::missing_terminator("input ended inside a table")),
            Some(token) if token.control == Control::Terminator => {
                Err(Error::missing_terminator("stream ended inside a table"))
            }
            Some(token) => Ok(token),
        }
    }

    fn message(&mut self) -> Result<Message> {
        let mut values = self.parse_values()?;
        Ok(match values.len() {
            0 => Message::Empty,
            1 => Message::Single(values.remove(0)),
            _ => Message::Many(values),
        })
    }
}

fn parse_number(payload: &str) -> Result<Number> {
    match payload {
        float::INFINITY => return Ok(Number::Float(f64::INFINITY)),
        float::NEG_INFINITY => return Ok(Number::Float(f64::NEG_INFINITY)),
        _ => {}
    }

    if let Ok(i) = payload.parse::<i64>() {
        // Keep the sign of negative zero.
        if i == 0 && payload.starts_with('-') {
            return Ok(Number::Float(-0.0));
        }
        return Ok(Number::Integer(i));
    }
    payload
        .parse::<f64>()
        .map(Number::Float)
        .map_err(|_| Error::invalid_number(payload))
}

/// The decoded values of one stream, shaped for `serde`.
enum Message {
    Empty,
    Single(AceValue),
    Many(Vec<AceValue>),
}

macro_rules! forward_to_message {
    ($($method:ident($($arg:ident: $ty:ty),*))*) => {
        $(
            fn $method<V>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                self.message()?.$method($($arg,)* visitor)
            }
        )*
    };
}

macro_rules! forward_to_single {
    ($($method:ident($($arg:ident: $ty:ty),*))*) => {
        $(
            fn $method<V>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self {
                    Message::Single(value) => AceValueDeserializer::new(value).$method($($arg,)* visitor),
                    other => other.deserialize_any(visitor),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    forward_to_message! {
        deserialize_any() deserialize_bool() deserialize_i8() deserialize_i16()
        deserialize_i32() deserialize_i64() deserialize_u8() deserialize_u16()
        deserialize_u32() deserialize_u64() deserialize_f32() deserialize_f64()
        deserialize_char() deserialize_str() deserialize_string() deserialize_bytes()
        deserialize_byte_buf() deserialize_option() deserialize_unit()
        deserialize_unit_struct(name: &'static str)
        deserialize_newtype_struct(name: &'static str)
        deserialize_seq()
        deserialize_tuple(len: usize)
        deserialize_tuple_struct(name: &'static str, len: usize)
        deserialize_map()
        deserialize_struct(name: &'static str, fields: &'static [&'static str])
        deserialize_enum(name: &'static str, variants: &'static [&'static str])
        deserialize_identifier() deserialize_ignored_any()
    }
}

impl<'de> de::Deserializer<'de> for Message {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Message::Empty => visitor.visit_unit(),
            Message::Single(value) => AceValueDeserializer::new(value).deserialize_any(visitor),
            Message::Many(values) => visitor.visit_seq(SeqDeserializer::new(values)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Message::Empty => visitor.visit_none(),
            Message::Single(value) => AceValueDeserializer::new(value).deserialize_option(visitor),
            many => visitor.visit_some(many),
        }
    }

    forward_to_single! {
        deserialize_bool() deserialize_i8() deserialize_i16() deserialize_i32()
        deserialize_i64() deserialize_u8() deserialize_u16() deserialize_u32()
        deserialize_u64() deserialize_f32() deserialize_f64() deserialize_char()
        deserialize_str() deserialize_string() deserialize_bytes() deserialize_byte_buf()
        deserialize_unit()
        deserialize_unit_struct(name: &'static str)
        deserialize_newtype_struct(name: &'static str)
        deserialize_seq()
        deserialize_tuple(len: usize)
        deserialize_tuple_struct(name: &'static str, len: usize)
        deserialize_map()
        deserialize_struct(name: &'static str, fields: &'static [&'static str])
        deserialize_enum(name: &'static str, variants: &'static [&'static str])
        deserialize_identifier() deserialize_ignored_any()
    }
}

/// A `serde` deserializer reading from an owned [`AceValue`].
pub(crate) struct AceValueDeserializer {
    value: AceValue,
}

impl AceValueDeserializer {
    pub(crate) fn new(value: AceValue) -> Self {
        AceValueDeserializer { value }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::custom(format!("expected {}, found {}", expected, self.value.kind()))
    }

    fn deserialize_integer<'de, V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            AceValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            AceValue::Number(Number::Float(f)) => match Number::Float(f).as_i64() {
                Some(i) => visitor.visit_i64(i),
                // Values past i64::MAX travel as floats.
                None if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 => {
                    visitor.visit_u64(f as u64)
                }
                None => visitor.visit_f64(f),
            },
            _ => Err(self.mismatch("integer")),
        }
    }
}

fn visit_table<'de, V>(table: AceTable, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    if table.is_sequence() {
        visitor.visit_seq(SeqDeserializer::new(table.into_sequence().unwrap_or_default()))
    } else {
        visitor.visit_map(MapDeserializer::new(table))
    }
}

impl<'de> de::Deserializer<'de> for AceValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            AceValue::Nil => visitor.visit_unit(),
            AceValue::Bool(b) => visitor.visit_bool(b),
            AceValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            AceValue::Number(Number::Float(f)) => visitor.visit_f64(f),
            AceValue::String(s) => visitor.visit_string(s),
            AceValue::Table(table) => visit_table(table, visitor),
        }
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_integer(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            AceValue::Nil => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            AceValue::Nil => visitor.visit_unit(),
            _ => Err(self.mismatch("nil")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            AceValue::Table(table) => match table.into_sequence() {
                Some(items) => visitor.visit_seq(SeqDeserializer::new(items)),
                None => Err(Error::custom("expected sequence, found table with non-index keys")),
            },
            _ => Err(self.mismatch("sequence")),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            AceValue::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(self.mismatch("table")),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            AceValue::String(s) => visitor.visit_enum(s.into_deserializer()),
            AceValue::Table(table) if table.len() == 1 => {
                match table.into_iter().next() {
                    Some((Key::String(variant), value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::custom("expected enum variant name")),
                }
            }
            _ => Err(self.mismatch("enum")),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string identifier
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<AceValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<AceValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(AceValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<Key, AceValue>,
    value: Option<AceValue>,
}

impl MapDeserializer {
    fn new(table: AceTable) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(AceValueDeserializer::new(AceValue::from(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(AceValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: AceValue,
}

impl EnumDeserializer {
    fn new(variant: String, value: AceValue) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(AceValueDeserializer::new(AceValue::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: AceValue,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            AceValue::Nil => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(AceValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            AceValue::Table(_) => AceValueDeserializer::new(self.value).deserialize_seq(visitor),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            AceValue::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Vec<AceValue>> {
        Deserializer::from_str(input).parse_values()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse("^1^Z^^").unwrap(), vec![AceValue::Nil]);
        assert_eq!(
            parse("^1^B^b^^").unwrap(),
            vec![AceValue::Bool(true), AceValue::Bool(false)]
        );
        assert_eq!(parse("^1^Sa~}b^^").unwrap(), vec![AceValue::from("a^b")]);
        assert_eq!(parse("^1^^").unwrap(), Vec::<AceValue>::new());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_number("42").unwrap(), Number::Integer(42));
        assert!(parse_number("42").unwrap().is_integer());
        assert!(parse_number("2.5").unwrap().is_float());
        assert_eq!(parse_number("1.#INF").unwrap().as_f64(), f64::INFINITY);
        assert_eq!(parse_number("-1.#INF").unwrap().as_f64(), f64::NEG_INFINITY);
        assert!(parse_number("NaN").unwrap().as_f64().is_nan());

        let zero = parse_number("-0").unwrap().as_f64();
        assert!(zero == 0.0 && zero.is_sign_negative());

        assert_eq!(parse_number("12abc"), Err(Error::invalid_number("12abc")));
    }

    #[test]
    fn test_depth_restored_after_error() {
        let mut de = Deserializer::with_options(
            "^T^T^Sa^t^T^T^N1^Sx^t^t",
            AceOptions::new().with_max_depth(2),
        );

        let first = de.tokens.next().unwrap();
        assert!(matches!(de.parse_value(first), Err(Error::InvalidTable(_))));
        assert_eq!(de.depth, 0);

        let second = de.tokens.next().unwrap();
        let mut inner = AceTable::new();
        inner.insert(0, AceValue::from("x"));
        let mut outer = AceTable::new();
        outer.insert(0, AceValue::Table(inner));
        assert_eq!(de.parse_value(second).unwrap(), AceValue::Table(outer));
    }

    #[test]
    fn test_float_pair() {
        assert_eq!(
            parse("^1^F5059599576362793^f-52^^").unwrap(),
            vec![AceValue::from(1.1234567890123321)]
        );
        assert!(matches!(
            parse("^1^F3^^"),
            Err(Error::InvalidFloatPair(_))
        ));
        assert!(matches!(
            parse("^1^F0^f-1^^"),
            Err(Error::InvalidFloatPair(_))
        ));
        assert!(matches!(
            parse("^1^F3^f0^^"),
            Err(Error::InvalidFloatPair(_))
        ));
        assert!(matches!(
            parse("^1^Fx^f1^^"),
            Err(Error::InvalidFloatPair(_))
        ));
    }

    #[test]
    fn test_structure_errors() {
        assert_eq!(parse(""), Err(Error::MissingVersionMarker));
        assert_eq!(parse("^2^Z^^"), Err(Error::MissingVersionMarker));
        assert!(matches!(parse("^1^Z"), Err(Error::MissingTerminator(_))));
        assert!(matches!(parse("^1^t^^"), Err(Error::InvalidControlCode(_))));
        assert!(matches!(parse("^1^f3^^"), Err(Error::InvalidControlCode(_))));
        assert!(matches!(parse("^1^X^^"), Err(Error::InvalidControlCode(_))));
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        assert_eq!(parse("^1^N1^^^N2^t").unwrap(), vec![AceValue::from(1)]);
    }

    #[test]
    fn test_table_keys_are_shifted() {
        let values = parse("^1^T^N1^Sa^N3^Sc^Sk^B^t^^").unwrap();
        let table = values[0].as_table().unwrap();
        assert_eq!(table.get(0), Some(&AceValue::from("a")));
        assert_eq!(table.get(2), Some(&AceValue::from("c")));
        assert_eq!(table.get("k"), Some(&AceValue::Bool(true)));
        assert!(!table.contains_key(1));
    }

    #[test]
    fn test_table_errors() {
        assert!(matches!(parse("^1^T^N1^t^^"), Err(Error::InvalidTable(_))));
        assert!(matches!(parse("^1^T^Z^N1^t^^"), Err(Error::InvalidTable(_))));
        assert!(matches!(parse("^1^T^N1^Z^t^^"), Err(Error::InvalidTable(_))));
        assert!(matches!(parse("^1^T^B^N1^t^^"), Err(Error::InvalidMapKey(_))));
        assert!(matches!(parse("^1^T^N1.5^N1^t^^"), Err(Error::InvalidMapKey(_))));
        assert!(matches!(parse("^1^T^T^t^N1^t^^"), Err(Error::InvalidMapKey(_))));
        assert!(matches!(
            parse("^1^T^N-9223372036854775808^N1^t^^"),
            Err(Error::InvalidMapKey(_))
        ));
        assert!(matches!(parse("^1^T^N1^N1^^"), Err(Error::MissingTerminator(_))));
        assert!(matches!(parse("^1^T^N1^N1"), Err(Error::MissingTerminator(_))));
    }

    #[test]
    fn test_depth_limit() {
        let nested = format!("^1{}{}^^", "^T^N1".repeat(4) + "^Z", "^t".repeat(4));
        let options = AceOptions::new().with_max_depth(3);
        assert_eq!(
            Deserializer::with_options(&nested, options).parse_values(),
            Err(Error::TooDeep(3))
        );
    }

    #[test]
    fn test_message_shapes() {
        use serde::Deserialize;

        let mut de = Deserializer::from_str("^1^^");
        assert_eq!(<()>::deserialize(&mut de), Ok(()));

        let mut de = Deserializer::from_str("^1^N7^^");
        assert_eq!(i32::deserialize(&mut de), Ok(7));

        let mut de = Deserializer::from_str("^1^Sa^Z^^");
        assert_eq!(
            <(String, Option<i32>)>::deserialize(&mut de),
            Ok(("a".to_string(), None))
        );
    }
}
