//! rbencode - A canonical bencode codec
//!
//! Converts between raw bencode bytes and an in-memory [`Value`] tree.
//! Encoding always produces the canonical form (dictionary keys in
//! ascending byte-wise order); decoding rejects malformed input with a
//! classified [`DecodeError`] and bounds nesting depth.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//!
//! # Example
//!
//! ```
//! use rbencode::{decode, encode, Value};
//!
//! let value = decode(b"d4:spaml1:a1:bee").unwrap();
//! assert_eq!(value.get(b"spam").and_then(Value::as_list).map(|l| l.len()), Some(2));
//! assert_eq!(encode(&value), b"d4:spaml1:a1:bee");
//! ```

pub mod bencode;

pub use bencode::{
    decode, decode_all, decode_prefix, decode_reader, encode, encode_to, ByteSource, DecodeError,
    Decoder, ReaderSource, SliceSource, Value, DEFAULT_MAX_DEPTH,
};
