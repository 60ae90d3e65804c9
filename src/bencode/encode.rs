use super::value::Value;
use std::io::{self, Write};

/// Encodes a bencode value to a byte vector.
///
/// The output is canonical:
/// - Byte strings: `<length>:<data>`
/// - Integers: `i<number>e`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`, keys in ascending byte-wise order
///
/// Encoding cannot fail.
///
/// # Examples
///
/// ```
/// use rbencode::{encode, Value};
///
/// assert_eq!(encode(&Value::Integer(-3)), b"i-3e");
/// assert_eq!(encode(&Value::string("")), b"0:");
///
/// let list = Value::List(vec![Value::string("spam"), Value::string("eggs")]);
/// assert_eq!(encode(&list), b"l4:spam4:eggse");
///
/// let dict: Value = [("spam", Value::string("eggs")), ("cow", Value::string("moo"))]
///     .into_iter()
///     .collect();
/// assert_eq!(encode(&dict), b"d3:cow3:moo4:spam4:eggse");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::with_capacity(value.encoded_len());
    // Writes into a Vec<u8> are infallible.
    let written = encode_value(value, &mut buf);
    debug_assert!(written.is_ok());
    buf
}

/// Encodes a bencode value into a writer.
///
/// Produces the same bytes as [`encode`]. The only errors are those
/// returned by `writer` itself.
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> io::Result<()> {
    encode_value(value, writer)
}

fn encode_value<W: Write>(value: &Value, writer: &mut W) -> io::Result<()> {
    match value {
        Value::ByteString(b) => encode_bytes(b, writer)?,
        Value::Integer(i) => write!(writer, "i{}e", i)?,
        Value::List(l) => {
            writer.write_all(b"l")?;
            for item in l {
                encode_value(item, writer)?;
            }
            writer.write_all(b"e")?;
        }
        Value::Dictionary(d) => {
            // BTreeMap<Bytes, _> iterates in byte-wise key order.
            writer.write_all(b"d")?;
            for (key, val) in d {
                encode_bytes(key, writer)?;
                encode_value(val, writer)?;
            }
            writer.write_all(b"e")?;
        }
    }
    Ok(())
}

fn encode_bytes<W: Write>(b: &[u8], writer: &mut W) -> io::Result<()> {
    write!(writer, "{}:", b.len())?;
    writer.write_all(b)
}
