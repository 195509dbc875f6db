//! Typed values and metadata bags
//!
//! Rules report the offending input and composites record bookkeeping
//! (names, indices, counts) as loosely-typed data. Instead of an untyped
//! "any" this module offers [`Value`], a small closed set of shapes, and
//! [`Metadata`], a string-keyed bag of values where the last write per key
//! wins.
//!
//! # Examples
//!
//! ```
//! use tributary::value::{Metadata, Value};
//!
//! let mut meta = Metadata::new();
//! meta.insert("totalValidators", 3usize);
//! meta.insert("chainName", "signup");
//! meta.insert("totalValidators", 4usize);
//!
//! assert_eq!(meta.get("totalValidators"), Some(&Value::UInt(4)));
//! assert_eq!(meta.get_str("chainName"), Some("signup"));
//! assert_eq!(meta.len(), 2);
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// A loosely-typed value carried in errors and metadata.
///
/// Integers compare by numeric value: `Int(3) == UInt(3)`. Serialized
/// integers carry no sign marker, so non-negative numbers always read back
/// as [`Value::UInt`] and negative ones as [`Value::Int`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Absence of a value
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Unsigned integer (counts, indices)
    UInt(u64),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Str(String),
    /// Ordered list of values
    List(Vec<Value>),
}

impl Value {
    /// Borrow the value as a string slice, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as an unsigned integer.
    ///
    /// Non-negative signed integers convert as well.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(n) => Some(*n),
            Value::Int(n) => u64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// The value as a signed integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(i), Value::UInt(u)) | (Value::UInt(u), Value::Int(i)) => {
                u64::try_from(*i).is_ok_and(|i| i == *u)
            }
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

macro_rules! impl_from_value {
    ($variant:ident, $cast:ty; $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                #[inline]
                fn from(v: $t) -> Self {
                    Value::$variant(v as $cast)
                }
            }
        )+
    };
}

impl_from_value!(Int, i64; i8, i16, i32, i64, isize);
impl_from_value!(UInt, u64; u8, u16, u32, u64, usize);
impl_from_value!(Float, f64; f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// A string-keyed bag of [`Value`]s.
///
/// Insertion order carries no meaning; writing an existing key replaces
/// the previous value. Iteration is in key order so that debug output
/// and equality are deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Metadata {
    entries: BTreeMap<String, Value>,
}

impl Metadata {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Look up a text value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Fold `other` into `self`; keys in `other` win.
    pub fn merge(&mut self, other: &Metadata) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Metadata::new();
        meta.extend(iter);
        meta
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Metadata {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Metadata {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(3i32), Value::Int(3));
        assert_eq!(Value::from(3usize), Value::UInt(3));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("x"), Value::Str("x".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(
            Value::from(vec![1u8, 2u8]),
            Value::List(vec![Value::UInt(1), Value::UInt(2)])
        );
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int(5).as_u64(), Some(5));
        assert_eq!(Value::Int(-5).as_u64(), None);
        assert_eq!(Value::UInt(7).as_i64(), Some(7));
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_integers_compare_by_value() {
        assert_eq!(Value::Int(3), Value::UInt(3));
        assert_eq!(Value::UInt(3), Value::Int(3));
        assert_ne!(Value::Int(-1), Value::UInt(u64::MAX));
        assert_ne!(Value::Int(3), Value::Float(3.0));
        assert_eq!(
            Value::List(vec![Value::Int(1)]),
            Value::List(vec![Value::UInt(1)])
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "[a, b]");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Int(-2).to_string(), "-2");
    }

    #[test]
    fn test_metadata_last_write_wins() {
        let mut meta = Metadata::new();
        meta.insert("k", 1i32);
        let previous = meta.insert("k", 2i32);

        assert_eq!(previous, Some(Value::Int(1)));
        assert_eq!(meta.get("k"), Some(&Value::Int(2)));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_metadata_merge_right_wins() {
        let mut left = Metadata::new().with("a", 1i32).with("b", 1i32);
        let right = Metadata::new().with("b", 2i32).with("c", 2i32);
        left.merge(&right);

        assert_eq!(left.get("a"), Some(&Value::Int(1)));
        assert_eq!(left.get("b"), Some(&Value::Int(2)));
        assert_eq!(left.get("c"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_metadata_from_iter() {
        let meta: Metadata = vec![("x", 1i32), ("y", 2i32)].into_iter().collect();
        assert!(meta.contains_key("x"));
        assert_eq!(meta.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["x", "y"]);
    }
}
