use bytes::Bytes;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// A decoded bencode value.
///
/// Byte strings are kept as raw [`Bytes`]; they are often, but not always,
/// UTF-8. Dictionaries are keyed by raw bytes and iterate in key order,
/// which is also the canonical encoding order.
///
/// # Examples
///
/// ```
/// use torrent_inspect::bencode::{decode_all, Value};
///
/// let value = decode_all(b"d4:name10:Ubuntu.isoe").unwrap();
/// assert_eq!(value.get(b"name").and_then(Value::as_str), Some("Ubuntu.iso"));
///
/// let int: Value = 42i64.into();
/// assert_eq!(int.as_integer(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// A byte string (may or may not be valid UTF-8).
    Bytes(Bytes),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte string keys.
    Dict(BTreeMap<Bytes, Value>),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a valid UTF-8 byte string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns a byte string as text, replacing invalid UTF-8 sequences with
    /// `U+FFFD`.
    ///
    /// Returns `None` only if the value is not a byte string.
    ///
    /// ```
    /// use torrent_inspect::bencode::Value;
    /// use bytes::Bytes;
    ///
    /// let value = Value::Bytes(Bytes::from_static(b"caf\xe9"));
    /// assert_eq!(value.to_string_lossy().as_deref(), Some("caf\u{fffd}"));
    /// assert_eq!(Value::Integer(1).to_string_lossy(), None);
    /// ```
    pub fn to_string_lossy(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Bytes(b) => Some(String::from_utf8_lossy(b)),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(self) -> Option<BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// Returns `None` if the value is not a dictionary or if the key is not present.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(d: BTreeMap<Bytes, Value>) -> Self {
        Value::Dict(d)
    }
}
