//! Byte sources the decoder reads through.
//!
//! The decoder only ever needs one byte of lookahead plus the ability to
//! pull a run of raw bytes for a byte string, so any input can be decoded
//! once it implements [`ByteSource`]. [`SliceSource`] covers in-memory
//! buffers and [`ReaderSource`] covers any [`BufRead`].

use std::io::{self, BufRead, Read};

use bytes::Bytes;

use super::error::DecodeError;

/// A cursor with one byte of lookahead.
pub trait ByteSource {
    /// Returns the next byte without consuming it, or `None` at end of input.
    fn peek(&mut self) -> Result<Option<u8>, DecodeError>;

    /// Consumes the byte most recently returned by [`peek`](Self::peek).
    ///
    /// Calling this without a preceding successful `peek` is a logic error;
    /// at end of input it does nothing.
    fn advance(&mut self);

    /// Consumes exactly `len` bytes.
    ///
    /// Fails with [`DecodeError::TruncatedString`] if the input holds fewer.
    fn take(&mut self, len: usize) -> Result<Bytes, DecodeError>;

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;
}

/// A [`ByteSource`] over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn peek(&mut self) -> Result<Option<u8>, DecodeError> {
        Ok(self.data.get(self.pos).copied())
    }

    fn advance(&mut self) {
        if self.pos < self.data.len() {
            self.pos += 1;
        }
    }

    fn take(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        let available = self.data.len() - self.pos;
        if len > available {
            return Err(DecodeError::TruncatedString {
                expected: len,
                available,
            });
        }

        let bytes = Bytes::copy_from_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(bytes)
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// A [`ByteSource`] over a buffered reader.
///
/// Lookahead is served from the reader's own buffer, so bytes after the
/// decoded value stay unread in the reader.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    pos: usize,
}

/// Upper bound on how much of a declared string length is allocated before
/// the bytes have actually arrived.
const TAKE_CHUNK: usize = 64 * 1024;

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, pos: 0 }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> ByteSource for ReaderSource<R> {
    fn peek(&mut self) -> Result<Option<u8>, DecodeError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::Io(e)),
            }
        }
    }

    fn advance(&mut self) {
        // fill_buf already holds the peeked byte, so this never touches the
        // underlying reader.
        if let Ok(buf) = self.reader.fill_buf() {
            if !buf.is_empty() {
                self.reader.consume(1);
                self.pos += 1;
            }
        }
    }

    fn take(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        let mut buf = Vec::with_capacity(len.min(TAKE_CHUNK));
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        self.pos += read;

        if read < len {
            return Err(DecodeError::TruncatedString {
                expected: len,
                available: read,
            });
        }

        Ok(Bytes::from(buf))
    }

    fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::{decode_reader, Value};
    use std::io::BufReader;

    /// Yields one byte per read, interrupting before each of the first
    /// `interrupts` bytes and failing once `fail_at` is reached.
    struct FlakyReader {
        data: &'static [u8],
        pos: usize,
        interrupts: usize,
        interrupted: bool,
        fail_at: Option<usize>,
    }

    impl FlakyReader {
        fn new(data: &'static [u8], interrupts: usize, fail_at: Option<usize>) -> Self {
            Self {
                data,
                pos: 0,
                interrupts,
                interrupted: false,
                fail_at,
            }
        }
    }

    impl Read for FlakyReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupts > 0 && !self.interrupted {
                self.interrupts -= 1;
                self.interrupted = true;
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.interrupted = false;

            if self.fail_at == Some(self.pos) {
                return Err(io::Error::new(io::ErrorKind::Other, "boom"));
            }
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn test_slice_source_peek_advance() {
        let mut src = SliceSource::new(b"ab");
        assert_eq!(src.peek().unwrap(), Some(b'a'));
        assert_eq!(src.peek().unwrap(), Some(b'a'));
        src.advance();
        assert_eq!(src.peek().unwrap(), Some(b'b'));
        src.advance();
        assert_eq!(src.peek().unwrap(), None);
        src.advance();
        assert_eq!(src.position(), 2);
    }

    #[test]
    fn test_slice_source_take_short() {
        let mut src = SliceSource::new(b"abc");
        match src.take(4) {
            Err(DecodeError::TruncatedString {
                expected: 4,
                available: 3,
            }) => {}
            other => panic!("expected truncated string, got {:?}", other),
        }
        assert_eq!(src.position(), 0);
        assert_eq!(src.take(3).unwrap(), Bytes::from_static(b"abc"));
        assert!(src.remaining().is_empty());
    }

    #[test]
    fn test_reader_source_leaves_rest_unread() {
        // A one-byte buffer forces every peek to refill.
        let mut src = ReaderSource::new(BufReader::with_capacity(1, &b"xyz"[..]));
        assert_eq!(src.peek().unwrap(), Some(b'x'));
        src.advance();
        assert_eq!(src.take(1).unwrap(), Bytes::from_static(b"y"));
        assert_eq!(src.position(), 2);

        let mut rest = Vec::new();
        src.into_inner().read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"z");
    }

    #[test]
    fn test_reader_source_take_short() {
        let mut src = ReaderSource::new(&b"ab"[..]);
        assert!(matches!(
            src.take(5),
            Err(DecodeError::TruncatedString {
                expected: 5,
                available: 2,
            })
        ));
    }

    #[test]
    fn test_reader_source_io_errors() {
        // Interrupts land on peeked bytes and inside the string payload.
        let reader = BufReader::with_capacity(1, FlakyReader::new(b"l4:spami1ee", 6, None));
        assert_eq!(
            decode_reader(reader).unwrap(),
            Value::List(vec![Value::string("spam"), Value::Integer(1)])
        );

        // Byte 5 is inside "spam", byte 8 inside the integer body.
        for fail_at in [5, 8] {
            let reader =
                BufReader::with_capacity(1, FlakyReader::new(b"l4:spami1ee", 0, Some(fail_at)));
            assert!(
                matches!(decode_reader(reader), Err(DecodeError::Io(_))),
                "failure at byte {} should surface as an io error",
                fail_at
            );
        }
    }
}
