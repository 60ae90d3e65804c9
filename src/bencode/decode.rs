use super::error::DecodeError;
use super::source::{ByteSource, ReaderSource, SliceSource};
use super::value::Value;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;
use tracing::{debug, trace};

/// Default ceiling on list/dictionary nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Longest integer body an `i64` can need: `-9223372036854775808`.
const MAX_INTEGER_LEN: usize = 20;

/// Longest length prefix a `usize` can need.
const MAX_LENGTH_DIGITS: usize = 20;

/// Decodes the first bencode value in `data`.
///
/// Bytes after the value are ignored; use [`decode_all`] to reject them or
/// [`decode_prefix`] to find out where the value ended.
///
/// # Examples
///
/// ```
/// use rbencode::{decode, DecodeError, Value};
///
/// assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
/// assert_eq!(decode(b"i42eextra").unwrap(), Value::Integer(42));
/// assert!(matches!(decode(b"i03e"), Err(DecodeError::MalformedInteger(_))));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    decode_prefix(data).map(|(value, _)| value)
}

/// Decodes the first bencode value in `data` and returns it together with
/// the number of bytes it occupied.
///
/// ```
/// use rbencode::{decode_prefix, Value};
///
/// let (value, used) = decode_prefix(b"d5:piecei0eeRAW").unwrap();
/// assert_eq!(value.get(b"piece"), Some(&Value::Integer(0)));
/// assert_eq!(used, 12);
/// ```
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), DecodeError> {
    let mut decoder = Decoder::new(SliceSource::new(data));
    let value = decoder.decode_value()?;
    Ok((value, decoder.position()))
}

/// Decodes `data` as exactly one bencode value.
///
/// Fails with [`DecodeError::TrailingData`] if anything follows the value.
pub fn decode_all(data: &[u8]) -> Result<Value, DecodeError> {
    let (value, used) = decode_prefix(data)?;

    if used != data.len() {
        return Err(DecodeError::TrailingData(data.len() - used));
    }

    Ok(value)
}

/// Decodes one bencode value from a buffered reader.
///
/// Bytes after the value are left unread in `reader`, so passing
/// `&mut reader` allows consecutive values to be decoded.
pub fn decode_reader<R: BufRead>(reader: R) -> Result<Value, DecodeError> {
    Decoder::new(ReaderSource::new(reader)).decode_value()
}

/// A recursive-descent bencode decoder over any [`ByteSource`].
///
/// Each call to [`decode_value`](Decoder::decode_value) consumes exactly one
/// value. Dictionaries are decoded permissively: keys may arrive in any
/// order and a repeated key replaces the earlier entry.
///
/// # Examples
///
/// ```
/// use rbencode::{Decoder, DecodeError, SliceSource, Value};
///
/// let mut decoder = Decoder::new(SliceSource::new(b"i1e3:two")).with_max_depth(8);
/// assert_eq!(decoder.decode_value().unwrap(), Value::Integer(1));
/// assert_eq!(decoder.decode_value().unwrap(), Value::string("two"));
/// assert!(matches!(
///     decoder.decode_value(),
///     Err(DecodeError::UnexpectedEndOfStream)
/// ));
/// ```
#[derive(Debug)]
pub struct Decoder<S> {
    source: S,
    max_depth: usize,
}

impl<S: ByteSource> Decoder<S> {
    /// Creates a decoder with the default nesting limit.
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how deeply lists and dictionaries may nest.
    ///
    /// A top-level list is depth 1. Input nested deeper fails with
    /// [`DecodeError::RecursionLimitExceeded`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The current nesting limit.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Bytes consumed from the source so far.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Borrows the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the source, positioned just after the last decoded value.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Decodes the next value from the source.
    pub fn decode_value(&mut self) -> Result<Value, DecodeError> {
        trace!("decoding bencode value at byte {}", self.position());

        self.parse_value(0).map_err(|e| {
            debug!("rejected bencode input at byte {}: {}", self.position(), e);
            e
        })
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        match self.source.peek()? {
            Some(b'i') => self.parse_integer().map(Value::Integer),
            Some(b'l') => self.parse_list(depth + 1),
            Some(b'd') => self.parse_dict(depth + 1),
            Some(b'0'..=b'9') => self.parse_bytes().map(Value::ByteString),
            Some(c) => Err(DecodeError::InvalidLeadingByte(c)),
            None => Err(DecodeError::UnexpectedEndOfStream),
        }
    }

    fn parse_integer(&mut self) -> Result<i64, DecodeError> {
        self.source.advance();

        let mut body = Vec::with_capacity(MAX_INTEGER_LEN);
        loop {
            match self.source.peek()? {
                Some(b'e') => {
                    self.source.advance();
                    break;
                }
                Some(c) => {
                    let allowed = c.is_ascii_digit() || (c == b'-' && body.is_empty());
                    body.push(c);
                    if !allowed || body.len() > MAX_INTEGER_LEN {
                        return Err(DecodeError::MalformedInteger(lossy(&body)));
                    }
                    self.source.advance();
                }
                None => return Err(DecodeError::UnexpectedEndOfStream),
            }
        }

        let (negative, digits) = match body.split_first() {
            Some((&b'-', rest)) => (true, rest),
            _ => (false, &body[..]),
        };

        let leading_zero = digits.first() == Some(&b'0') && (digits.len() > 1 || negative);
        if digits.is_empty() || leading_zero {
            return Err(DecodeError::MalformedInteger(lossy(&body)));
        }

        std::str::from_utf8(&body)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| DecodeError::MalformedInteger(lossy(&body)))
    }

    fn parse_bytes(&mut self) -> Result<Bytes, DecodeError> {
        let mut digits = Vec::with_capacity(MAX_LENGTH_DIGITS);
        loop {
            match self.source.peek()? {
                Some(b':') => {
                    self.source.advance();
                    break;
                }
                Some(c) => {
                    digits.push(c);
                    if !c.is_ascii_digit() || digits.len() > MAX_LENGTH_DIGITS {
                        return Err(DecodeError::MalformedLength(lossy(&digits)));
                    }
                    self.source.advance();
                }
                None => return Err(DecodeError::UnexpectedEndOfStream),
            }
        }

        let len = std::str::from_utf8(&digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| DecodeError::MalformedLength(lossy(&digits)))?;

        self.source.take(len)
    }

    fn parse_list(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.check_depth(depth)?;
        self.source.advance();

        let mut list = Vec::new();
        loop {
            match self.source.peek()? {
                Some(b'e') => {
                    self.source.advance();
                    return Ok(Value::List(list));
                }
                Some(_) => list.push(self.parse_value(depth)?),
                None => return Err(DecodeError::UnterminatedList),
            }
        }
    }

    fn parse_dict(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.check_depth(depth)?;
        self.source.advance();

        let mut dict = BTreeMap::new();
        loop {
            match self.source.peek()? {
                Some(b'e') => {
                    self.source.advance();
                    return Ok(Value::Dictionary(dict));
                }
                Some(_) => {
                    let key = self.parse_bytes()?;
                    if self.source.peek()?.is_none() {
                        return Err(DecodeError::UnterminatedDict);
                    }
                    let value = self.parse_value(depth)?;
                    dict.insert(key, value);
                }
                None => return Err(DecodeError::UnterminatedDict),
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), DecodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::RecursionLimitExceeded(self.max_depth));
        }
        Ok(())
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
