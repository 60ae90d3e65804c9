//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is a length-prefixed format with four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Encoding is canonical: dictionary keys are always written in ascending
//! byte-wise order, so equal values always produce identical bytes.
//! Decoding is permissive about dictionary key order and duplicate keys
//! (the last occurrence wins) but strict about everything else.
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use rbencode::{decode, Value};
//!
//! let value = decode(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list[0].as_str(), Some("spam"));
//! assert_eq!(list[1].as_integer(), Some(42));
//!
//! let value = decode(b"d3:foo3:bare").unwrap();
//! assert_eq!(value.get(b"foo").and_then(Value::as_str), Some("bar"));
//! ```
//!
//! ## Encoding bencode data
//!
//! ```
//! use rbencode::{encode, Value};
//! use bytes::Bytes;
//! use std::collections::BTreeMap;
//!
//! let mut info = BTreeMap::new();
//! info.insert(Bytes::from_static(b"name"), Value::string("example.txt"));
//! info.insert(Bytes::from_static(b"length"), Value::Integer(1024));
//!
//! let encoded = encode(&Value::Dictionary(info));
//! assert_eq!(encoded, b"d6:lengthi1024e4:name11:example.txte");
//! ```
//!
//! ## Decoding from a stream
//!
//! ```
//! use rbencode::{decode_reader, Value};
//! use std::io::{BufReader, Read};
//!
//! let mut reader = BufReader::new(&b"i1ei2erest"[..]);
//! assert_eq!(decode_reader(&mut reader).unwrap(), Value::Integer(1));
//! assert_eq!(decode_reader(&mut reader).unwrap(), Value::Integer(2));
//!
//! let mut rest = String::new();
//! reader.read_to_string(&mut rest).unwrap();
//! assert_eq!(rest, "rest");
//! ```
//!
//! # Error Handling
//!
//! Decoding fails fast with a [`DecodeError`] naming what went wrong:
//!
//! - [`DecodeError::InvalidLeadingByte`] - A value started with an unknown byte
//! - [`DecodeError::MalformedInteger`] - Bad integer (leading zeros, `-0`, overflow)
//! - [`DecodeError::MalformedLength`] - Bad byte string length prefix
//! - [`DecodeError::TruncatedString`] - Byte string longer than the input
//! - [`DecodeError::UnterminatedList`] / [`DecodeError::UnterminatedDict`] - Missing `e`
//! - [`DecodeError::UnexpectedEndOfStream`] - Input ended where a value was required
//! - [`DecodeError::RecursionLimitExceeded`] - Nesting deeper than [`DEFAULT_MAX_DEPTH`]
//! - [`DecodeError::TrailingData`] - Extra data after the value ([`decode_all`] only)
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod source;
mod value;

pub use decode::{decode, decode_all, decode_prefix, decode_reader, Decoder, DEFAULT_MAX_DEPTH};
pub use encode::{encode, encode_to};
pub use error::DecodeError;
pub use source::{ByteSource, ReaderSource, SliceSource};
pub use value::Value;
