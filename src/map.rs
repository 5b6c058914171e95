//! Table type for AceSerializer values.
//!
//! This module provides [`AceTable`], a wrapper around [`IndexMap`] keyed by
//! [`Key`]. Tables model Lua-style containers: a single type covers both
//! sequences (integer keys) and records (string keys), and mixing the two is
//! allowed.
//!
//! ## Holes
//!
//! A table never stores [`AceValue::Nil`]. Inserting `Nil` removes the key,
//! exactly like assigning `nil` to a Lua table field. A sequence with a `Nil`
//! element therefore has a hole at that index and the following elements keep
//! their positions.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ace::{AceTable, AceValue, Key};
//!
//! let mut table = AceTable::new();
//! table.insert("name", AceValue::from("Alice"));
//! table.insert(0, AceValue::from(30));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! assert_eq!(table.get(Key::Integer(0)).and_then(|v| v.as_i64()), Some(30));
//! ```

use crate::{AceValue, Error, Number, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

/// A table key: an integer index or a string field name.
///
/// Integer keys are written to the wire incremented by one and decremented
/// again when read, so `Key::Integer(0)` travels as `^N1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Integer(i64),
    String(String),
}

impl Key {
    /// If the key is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Key::Integer(i) => Some(*i),
            Key::String(_) => None,
        }
    }

    /// If the key is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(s) => Some(s),
            Key::Integer(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Integer(i) => write!(f, "{}", i),
            Key::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Integer(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Integer(value as i64)
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Integer(value as i64)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::String(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::String(value.to_string())
    }
}

impl From<Key> for AceValue {
    fn from(key: Key) -> Self {
        match key {
            Key::Integer(i) => AceValue::Number(Number::Integer(i)),
            Key::String(s) => AceValue::String(s),
        }
    }
}

impl TryFrom<AceValue> for Key {
    type Error = Error;

    fn try_from(value: AceValue) -> crate::Result<Self> {
        match value {
            AceValue::Number(Number::Integer(i)) => Ok(Key::Integer(i)),
            AceValue::String(s) => Ok(Key::String(s)),
            other => Err(Error::invalid_map_key(other.kind())),
        }
    }
}

/// An insertion-ordered table of AceSerializer values.
///
/// Equality ignores insertion order, matching the unordered nature of the
/// tables this format carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AceTable(IndexMap<Key, AceValue>);

impl AceTable {
    /// Creates an empty `AceTable`.
    #[must_use]
    pub fn new() -> Self {
        AceTable(IndexMap::new())
    }

    /// Creates an empty `AceTable` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AceTable(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the table, returning the previous value.
    ///
    /// Inserting [`AceValue::Nil`] removes the key instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ace::{AceTable, AceValue};
    ///
    /// let mut table = AceTable::new();
    /// assert!(table.insert("key", AceValue::from(42)).is_none());
    /// assert!(table.insert("key", AceValue::Nil).is_some());
    /// assert!(table.is_empty());
    /// ```
    pub fn insert(&mut self, key: impl Into<Key>, value: AceValue) -> Option<AceValue> {
        let key = key.into();
        if value.is_nil() {
            self.0.shift_remove(&key)
        } else {
            self.0.insert(key, value)
        }
    }

    /// Appends `value` at the next sequence index (`len()` for dense sequences).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMapKey`] if the table already holds the key
    /// `i64::MAX`.
    pub fn push(&mut self, value: AceValue) -> Result<()> {
        let index = self
            .next_index()
            .ok_or_else(|| Error::invalid_map_key("no integer key left after i64::MAX"))?;
        self.insert(index, value);
        Ok(())
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<AceValue> {
        self.0.shift_remove(&key.into())
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: impl Into<Key>) -> Option<&AceValue> {
        self.0.get(&key.into())
    }

    /// Returns `true` if the table contains the key.
    #[must_use]
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.0.contains_key(&key.into())
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, AceValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, AceValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the table, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, AceValue> {
        self.0.iter()
    }

    /// Returns `true` if the keys are exactly the integers `0..len()`.
    ///
    /// An empty table counts as a sequence.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        let len = self.0.len() as i64;
        self.0
            .keys()
            .all(|key| matches!(key, Key::Integer(i) if (0..len).contains(i)))
    }

    /// Converts the table into a vector ordered by integer key.
    ///
    /// Missing indices become [`AceValue::Nil`]. Returns `None` if any key is
    /// a string or negative, or if holes would make up more than half of the
    /// resulting vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ace::{AceTable, AceValue};
    ///
    /// let mut table = AceTable::new();
    /// table.insert(0, AceValue::from("a"));
    /// table.insert(2, AceValue::from("c"));
    ///
    /// let items = table.into_sequence().unwrap();
    /// assert_eq!(items, vec![AceValue::from("a"), AceValue::Nil, AceValue::from("c")]);
    /// ```
    #[must_use]
    pub fn into_sequence(self) -> Option<Vec<AceValue>> {
        let mut max = -1i64;
        for key in self.0.keys() {
            match key {
                Key::Integer(i) if *i >= 0 => max = max.max(*i),
                _ => return None,
            }
        }

        let len = usize::try_from(max.checked_add(1)?).ok()?;
        if len > self.0.len().saturating_mul(2).max(1) {
            return None;
        }

        let mut items = vec![AceValue::Nil; len];
        for (key, value) in self.0 {
            if let Key::Integer(i) = key {
                items[i as usize] = value;
            }
        }
        Some(items)
    }

    fn next_index(&self) -> Option<i64> {
        let next = match self.0.keys().filter_map(Key::as_integer).max() {
            Some(max) => max.checked_add(1)?,
            None => 0,
        };
        Some(next.max(self.0.len() as i64))
    }
}

impl From<Vec<AceValue>> for AceTable {
    /// Builds a sequence keyed `0..n`; `Nil` elements leave holes.
    fn from(items: Vec<AceValue>) -> Self {
        let mut table = AceTable::with_capacity(items.len());
        for (index, value) in items.into_iter().enumerate() {
            table.insert(index as i64, value);
        }
        table
    }
}

impl From<HashMap<String, AceValue>> for AceTable {
    fn from(map: HashMap<String, AceValue>) -> Self {
        map.into_iter().collect()
    }
}

impl IntoIterator for AceTable {
    type Item = (Key, AceValue);
    type IntoIter = indexmap::map::IntoIter<Key, AceValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AceTable {
    type Item = (&'a Key, &'a AceValue);
    type IntoIter = indexmap::map::Iter<'a, Key, AceValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<Key>> FromIterator<(K, AceValue)> for AceTable {
    fn from_iter<T: IntoIterator<Item = (K, AceValue)>>(iter: T) -> Self {
        let mut table = AceTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_leaves_hole() {
        let table = AceTable::from(vec![
            AceValue::from(1),
            AceValue::Nil,
            AceValue::from(3),
        ]);
        assert_eq!(table.len(), 2);
        assert!(!table.contains_key(1));
        assert_eq!(table.get(2), Some(&AceValue::from(3)));
        assert!(!table.is_sequence());
    }

    #[test]
    fn test_is_sequence() {
        assert!(AceTable::new().is_sequence());

        let mut table = AceTable::new();
        table.insert(1, AceValue::from("b"));
        table.insert(0, AceValue::from("a"));
        assert!(table.is_sequence());

        table.insert("x", AceValue::from(true));
        assert!(!table.is_sequence());
    }

    #[test]
    fn test_push_after_hole() {
        let mut table = AceTable::from(vec![AceValue::from(1), AceValue::Nil, AceValue::from(3)]);
        table.push(AceValue::from(4)).unwrap();
        assert_eq!(table.get(3), Some(&AceValue::from(4)));
    }

    #[test]
    fn test_push_after_max_key() {
        let mut table = AceTable::new();
        table.insert(i64::MAX, AceValue::from(1));
        assert!(matches!(
            table.push(AceValue::from(2)),
            Err(Error::InvalidMapKey(_))
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_into_sequence_max_key() {
        let mut table = AceTable::new();
        table.insert(i64::MAX, AceValue::from(1));
        assert_eq!(table.into_sequence(), None);
    }

    #[test]
    fn test_into_sequence_rejects_sparse_and_mixed() {
        let mut sparse = AceTable::new();
        sparse.insert(1_000_000, AceValue::from(1));
        assert_eq!(sparse.into_sequence(), None);

        let mut mixed = AceTable::new();
        mixed.insert(0, AceValue::from(1));
        mixed.insert("name", AceValue::from(2));
        assert_eq!(mixed.into_sequence(), None);

        let mut negative = AceTable::new();
        negative.insert(-1, AceValue::from(1));
        assert_eq!(negative.into_sequence(), None);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: AceTable = vec![("x", AceValue::from(1)), ("y", AceValue::from(2))]
            .into_iter()
            .collect();
        let b: AceTable = vec![("y", AceValue::from(2)), ("x", AceValue::from(1))]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_try_from_value() {
        assert_eq!(Key::try_from(AceValue::from(3)), Ok(Key::Integer(3)));
        assert_eq!(Key::try_from(AceValue::from("k")), Ok(Key::from("k")));
        assert!(matches!(
            Key::try_from(AceValue::from(1.5)),
            Err(Error::InvalidMapKey(_))
        ));
        assert!(matches!(
            Key::try_from(AceValue::Bool(true)),
            Err(Error::InvalidMapKey(_))
        ));
    }
}
