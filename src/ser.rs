//! AceSerializer encoding.
//!
//! This module provides two serializers:
//!
//! - [`Serializer`] writes [`AceValue`]s as a token stream into an
//!   append-only buffer.
//! - [`AceValueSerializer`] is a `serde` serializer that converts any
//!   `T: Serialize` into an [`AceValue`] first.
//!
//! ## Token Mapping
//!
//! | value | tokens |
//! |-------|--------|
//! | nil | `^Z` |
//! | true / false | `^B` / `^b` |
//! | integer, short float | `^N` + decimal text |
//! | infinity | `^N1.#INF` / `^N-1.#INF` |
//! | other float | `^F` + mantissa, `^f` + exponent |
//! | string | `^S` + escaped text |
//! | table | `^T`, key/value pairs, `^t` |
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_ace::{AceOptions, AceValue, Serializer};
//!
//! let mut serializer = Serializer::new(AceOptions::new());
//! serializer.write_header();
//! serializer.write_value(&AceValue::from("a^b")).unwrap();
//! serializer.write_value(&AceValue::from(42)).unwrap();
//! serializer.write_terminator();
//!
//! assert_eq!(serializer.into_inner(), "^1^Sa~}b^N42^^");
//! ```

use crate::escape::escape_into;
use crate::float::{self, needs_exact_pair, plain_text, to_wire_pair};
use crate::token::Control;
use crate::{AceOptions, AceTable, AceValue, Error, Key, Number, Result};
use serde::{ser, Serialize};

/// Writes AceSerializer tokens for [`AceValue`]s.
///
/// Created via [`Serializer::new`]. Output only grows; on error the caller
/// discards the whole buffer.
pub struct Serializer {
    output: String,
    options: AceOptions,
    depth: usize,
}

impl Serializer {
    pub fn new(options: AceOptions) -> Self {
        Serializer {
            output: String::with_capacity(64),
            options,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the `^1` revision marker.
    pub fn write_header(&mut self) {
        self.push_control(Control::Version);
    }

    /// Writes the `^^` terminator.
    pub fn write_terminator(&mut self) {
        self.push_control(Control::Terminator);
    }

    /// Writes the tokens of one value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooDeep`] if tables nest deeper than the configured
    /// limit, or [`Error::InvalidMapKey`] for an integer key of `i64::MAX`,
    /// which has no 1-based wire form.
    pub fn write_value(&mut self, value: &AceValue) -> Result<()> {
        match value {
            AceValue::Nil => self.push_control(Control::Nil),
            AceValue::Bool(true) => self.push_control(Control::True),
            AceValue::Bool(false) => self.push_control(Control::False),
            AceValue::Number(number) => self.write_number(*number),
            AceValue::String(s) => self.write_string(s),
            AceValue::Table(table) => self.write_table(table)?,
        }
        Ok(())
    }

    #[inline]
    fn push_control(&mut self, control: Control) {
        self.output.push_str(control.as_str());
    }

    fn write_number(&mut self, number: Number) {
        match number {
            Number::Integer(i) => {
                self.push_control(Control::Number);
                self.output.push_str(&i.to_string());
            }
            Number::Float(f) if f.is_infinite() => {
                self.push_control(Control::Number);
                self.output.push_str(if f > 0.0 {
                    float::INFINITY
                } else {
                    float::NEG_INFINITY
                });
            }
            Number::Float(f) if needs_exact_pair(f) => {
                let (mantissa, exponent) = to_wire_pair(f);
                self.push_control(Control::Mantissa);
                self.output.push_str(&mantissa.to_string());
                self.push_control(Control::Exponent);
                self.output.push_str(&exponent.to_string());
            }
            Number::Float(f) => {
                self.push_control(Control::Number);
                self.output.push_str(&plain_text(f));
            }
        }
    }

    fn write_string(&mut self, s: &str) {
        self.push_control(Control::String);
        escape_into(&mut self.output, s);
    }

    fn write_table(&mut self, table: &AceTable) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(Error::TooDeep(self.options.max_depth));
        }
        self.depth += 1;
        let result = self.write_entries(table);
        self.depth -= 1;
        result
    }

    fn write_entries(&mut self, table: &AceTable) -> Result<()> {
        self.push_control(Control::TableStart);
        for (key, value) in table {
            match key {
                Key::Integer(i) => {
                    let wire = i.checked_add(1).ok_or_else(|| {
                        Error::invalid_map_key(&format!("integer key {} out of range", i))
                    })?;
                    self.write_number(Number::Integer(wire));
                }
                Key::String(s) => self.write_string(s),
            }
            self.write_value(value)?;
        }
        self.push_control(Control::TableEnd);
        Ok(())
    }
}

/// A `serde` serializer producing [`AceValue`]s.
///
/// - sequences and tuples become tables keyed `0..n`; `None` elements leave holes
/// - maps and structs become tables; map keys must be integers or strings
/// - `None` and unit become [`AceValue::Nil`]
/// - enum variants are externally tagged: `{variant = value}`
pub struct AceValueSerializer;

pub struct SerializeVec {
    table: AceTable,
    index: i64,
}

pub struct SerializeMap {
    table: AceTable,
    current_key: Option<Key>,
}

pub struct SerializeVariant<T> {
    variant: &'static str,
    inner: T,
}

impl ser::Serializer for AceValueSerializer {
    type Ok = AceValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVariant<SerializeVec>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeVariant<SerializeMap>;

    fn serialize_bool(self, v: bool) -> Result<AceValue> {
        Ok(AceValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<AceValue> {
        Number::from_u64(v).map(AceValue::Number).ok_or_else(|| {
            Error::invalid_number(&format!("{} does not fit an integer or an exact float", v))
        })
    }

    fn serialize_f32(self, v: f32) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_char(self, v: char) -> Result<AceValue> {
        Ok(AceValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<AceValue> {
        Ok(AceValue::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<AceValue> {
        let items = v.iter().map(|&b| AceValue::from(b)).collect::<Vec<_>>();
        Ok(AceValue::from(items))
    }

    fn serialize_none(self) -> Result<AceValue> {
        Ok(AceValue::Nil)
    }

    fn serialize_some<T>(self, value: &T) -> Result<AceValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<AceValue> {
        Ok(AceValue::Nil)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<AceValue> {
        Ok(AceValue::Nil)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<AceValue> {
        Ok(AceValue::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<AceValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<AceValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_ace_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVariant<SerializeVec>> {
        Ok(SerializeVariant {
            variant,
            inner: SerializeVec::new(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVariant<SerializeMap>> {
        Ok(SerializeVariant {
            variant,
            inner: SerializeMap::new(),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            table: AceTable::with_capacity(capacity),
            index: 0,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.table.insert(self.index, to_ace_value(value)?);
        self.index += 1;
        Ok(())
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            table: AceTable::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = AceValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<AceValue> {
        Ok(AceValue::Table(self.table))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = AceValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<AceValue> {
        Ok(AceValue::Table(self.table))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = AceValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<AceValue> {
        Ok(AceValue::Table(self.table))
    }
}

impl ser::SerializeTupleVariant for SerializeVariant<SerializeVec> {
    type Ok = AceValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.push(value)
    }

    fn end(self) -> Result<AceValue> {
        Ok(tagged(self.variant, AceValue::Table(self.inner.table)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = AceValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(Key::try_from(to_ace_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.table.insert(key, to_ace_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<AceValue> {
        Ok(AceValue::Table(self.table))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = AceValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.table.insert(key, to_ace_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<AceValue> {
        Ok(AceValue::Table(self.table))
    }
}

impl ser::SerializeStructVariant for SerializeVariant<SerializeMap> {
    type Ok = AceValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.table.insert(key, to_ace_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<AceValue> {
        Ok(tagged(self.variant, AceValue::Table(self.inner.table)))
    }
}

pub(crate) fn to_ace_value<T: Serialize + ?Sized>(value: &T) -> Result<AceValue> {
    value.serialize(AceValueSerializer)
}

fn tagged(variant: &'static str, value: AceValue) -> AceValue {
    let mut table = AceTable::with_capacity(1);
    table.insert(variant, value);
    AceValue::Table(table)
}
