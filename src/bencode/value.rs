use bytes::Bytes;
use std::collections::BTreeMap;

/// A bencode value.
///
/// Bencode has exactly four shapes: byte strings, integers, lists and
/// dictionaries. Dictionaries are kept in a [`BTreeMap`], so iteration is
/// always in ascending byte-wise key order, which is also the order the
/// encoder emits.
///
/// # Examples
///
/// ```
/// use rbencode::Value;
///
/// // Creating values directly
/// let int = Value::Integer(42);
/// let string = Value::string("hello");
/// let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
///
/// // Using From implementations
/// let int: Value = 42i64.into();
/// let string: Value = "hello".into();
///
/// // Accessing values
/// assert_eq!(int.as_integer(), Some(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert_eq!(list.as_list().map(|l| l.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A byte string. Not required to be valid UTF-8.
    ByteString(Bytes),
    /// A signed 64-bit integer.
    Integer(i64),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary keyed by byte strings.
    Dictionary(BTreeMap<Bytes, Value>),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    ///
    /// ```
    /// use rbencode::Value;
    ///
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_str(), Some("hello"));
    /// ```
    pub fn string(s: &str) -> Self {
        Value::ByteString(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Creates a byte string value from raw bytes.
    pub fn bytes(b: impl Into<Bytes>) -> Self {
        Value::ByteString(b.into())
    }

    /// Creates an empty list.
    pub fn list() -> Self {
        Value::List(Vec::new())
    }

    /// Creates an empty dictionary.
    pub fn dictionary() -> Self {
        Value::Dictionary(BTreeMap::new())
    }

    /// Returns the name of this value's shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::ByteString(_) => "byte string",
            Value::Integer(_) => "integer",
            Value::List(_) => "list",
            Value::Dictionary(_) => "dictionary",
        }
    }

    /// Returns `true` if this is a byte string.
    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::ByteString(_))
    }

    /// Returns `true` if this is an integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if this is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` if this is a dictionary.
    pub fn is_dict(&self) -> bool {
        matches!(self, Value::Dictionary(_))
    }

    /// Returns the value as an integer, if it is one.
    ///
    /// ```
    /// use rbencode::Value;
    ///
    /// assert_eq!(Value::Integer(42).as_integer(), Some(42));
    /// assert_eq!(Value::string("hello").as_integer(), None);
    /// ```
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a byte string, if it is one.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::ByteString(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string.
    ///
    /// Returns `None` if the value is not a byte string or if the bytes are
    /// not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::ByteString(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the value as a dictionary reference, if it is one.
    ///
    /// ```
    /// use rbencode::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// let dict = value.as_dict().unwrap();
    /// assert!(dict.contains_key(b"foo".as_slice()));
    /// ```
    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the byte string, if it is one.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Value::ByteString(b) => Some(b),
            _ => None,
        }
    }

    /// Consumes the value and returns the list, if it is one.
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(self) -> Option<BTreeMap<Bytes, Value>> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key if this value is a dictionary.
    ///
    /// ```
    /// use rbencode::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// Inserts an entry if this value is a dictionary, replacing any
    /// previous value under the same key.
    ///
    /// Returns `false` and leaves `self` untouched if it is not a dictionary.
    ///
    /// ```
    /// use rbencode::{encode, Value};
    ///
    /// let mut dict = Value::dictionary();
    /// assert!(dict.insert("spam", "eggs".into()));
    /// assert!(dict.insert("cow", "moo".into()));
    /// assert_eq!(encode(&dict), b"d3:cow3:moo4:spam4:eggse");
    /// ```
    pub fn insert(&mut self, key: impl Into<Bytes>, value: Value) -> bool {
        match self {
            Value::Dictionary(d) => {
                d.insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Appends an element if this value is a list.
    ///
    /// Returns `false` and leaves `self` untouched if it is not a list.
    pub fn push(&mut self, value: Value) -> bool {
        match self {
            Value::List(l) => {
                l.push(value);
                true
            }
            _ => false,
        }
    }

    /// Returns the exact number of bytes [`encode`](crate::encode) produces
    /// for this value.
    pub fn encoded_len(&self) -> usize {
        match self {
            Value::ByteString(b) => string_len(b.len()),
            Value::Integer(i) => 2 + integer_digits(*i),
            Value::List(l) => 2 + l.iter().map(Value::encoded_len).sum::<usize>(),
            Value::Dictionary(d) => {
                2 + d
                    .iter()
                    .map(|(k, v)| string_len(k.len()) + v.encoded_len())
                    .sum::<usize>()
            }
        }
    }
}

fn string_len(len: usize) -> usize {
    decimal_digits(len as u64) + 1 + len
}

fn integer_digits(i: i64) -> usize {
    let sign = usize::from(i < 0);
    sign + decimal_digits(i.unsigned_abs())
}

fn decimal_digits(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl TryFrom<u64> for Value {
    type Error = std::num::TryFromIntError;

    fn try_from(i: u64) -> Result<Self, Self::Error> {
        Ok(Value::Integer(i64::try_from(i)?))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::ByteString(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::ByteString(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::ByteString(Bytes::from(b))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::ByteString(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(d: BTreeMap<Bytes, Value>) -> Self {
        Value::Dictionary(d)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

/// Collects key/value pairs into a dictionary. Later duplicates win.
impl<K: Into<Bytes>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Dictionary(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
