use thiserror::Error;

/// Errors that can occur while decoding bencode.
///
/// Each variant names the production that rejected the input. A truncated
/// stream ([`UnexpectedEndOfStream`](DecodeError::UnexpectedEndOfStream),
/// [`TruncatedString`](DecodeError::TruncatedString) and the unterminated
/// container variants) is reported separately from malformed bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A value started with a byte that begins no production.
    #[error("invalid leading byte: 0x{0:02x}")]
    InvalidLeadingByte(u8),

    /// An integer body broke the digit, sign or leading-zero rules, or
    /// does not fit in an `i64`.
    #[error("malformed integer: {0:?}")]
    MalformedInteger(String),

    /// A byte string length prefix is not a non-negative decimal.
    #[error("malformed string length: {0:?}")]
    MalformedLength(String),

    /// A byte string declared more bytes than the input holds.
    #[error("truncated string: expected {expected} bytes, {available} available")]
    TruncatedString { expected: usize, available: usize },

    /// The input ended inside a list.
    #[error("unterminated list")]
    UnterminatedList,

    /// The input ended inside a dictionary.
    #[error("unterminated dictionary")]
    UnterminatedDict,

    /// The input ended where a value or terminator was required.
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,

    /// Lists and dictionaries were nested deeper than the decoder allows.
    #[error("nesting exceeds limit of {0}")]
    RecursionLimitExceeded(usize),

    /// Bytes remained after the value in a strict decode.
    #[error("{0} trailing bytes after value")]
    TrailingData(usize),

    /// The underlying reader failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
