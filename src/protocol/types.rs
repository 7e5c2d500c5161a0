//! RESP Reply Values
//!
//! Every reply a server sends back is one of the shapes below. The same
//! enum is also what a [`Command`](crate::command::Command) turns into when
//! it is framed for the wire (an array of bulk strings).
//!
//! ## Wire Shapes
//!
//! | Prefix | Shape          | Example                    |
//! |--------|----------------|----------------------------|
//! | `+`    | Status         | `+OK\r\n`                  |
//! | `-`    | Error          | `-WRONGTYPE ...\r\n`       |
//! | `:`    | Integer        | `:1\r\n`                   |
//! | `$`    | Bulk string    | `$5\r\nhello\r\n`          |
//! | `$-1`  | Nil            | `$-1\r\n`                  |
//! | `*`    | Array          | `*2\r\n:1\r\n:2\r\n`       |

use bytes::Bytes;
use std::fmt;

/// The CRLF terminator used in RESP protocol
pub const CRLF: &[u8] = b"\r\n";

/// RESP protocol type prefixes
pub mod prefix {
    pub const SIMPLE_STRING: u8 = b'+';
    pub const ERROR: u8 = b'-';
    pub const INTEGER: u8 = b':';
    pub const BULK_STRING: u8 = b'$';
    pub const ARRAY: u8 = b'*';
}

/// A single reply (or request frame) in the RESP protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespValue {
    /// Short status line such as `OK` or `string`.
    SimpleString(String),

    /// Error line sent by the server, e.g. `ERR no such key`.
    Error(String),

    /// 64-bit signed integer.
    Integer(i64),

    /// Binary-safe, length-prefixed payload.
    BulkString(Bytes),

    /// Nil bulk string or nil array.
    Null,

    /// Ordered sequence of nested replies.
    Array(Vec<RespValue>),
}

impl RespValue {
    pub fn simple_string(s: impl Into<String>) -> Self {
        RespValue::SimpleString(s.into())
    }

    pub fn error(s: impl Into<String>) -> Self {
        RespValue::Error(s.into())
    }

    pub fn integer(n: i64) -> Self {
        RespValue::Integer(n)
    }

    /// Creates a bulk string.
    ///
    /// # Example
    /// ```
    /// use flashkv_client::protocol::RespValue;
    /// let bulk = RespValue::bulk_string("user:1");
    /// assert_eq!(bulk.as_str(), Some("user:1"));
    /// ```
    pub fn bulk_string(data: impl Into<Bytes>) -> Self {
        RespValue::BulkString(data.into())
    }

    pub fn null() -> Self {
        RespValue::Null
    }

    pub fn array(values: Vec<RespValue>) -> Self {
        RespValue::Array(values)
    }

    /// The `+OK` status reply.
    pub fn ok() -> Self {
        RespValue::SimpleString("OK".to_string())
    }

    /// Short name of the reply shape, used in decoding errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            RespValue::SimpleString(_) => "status",
            RespValue::Error(_) => "error",
            RespValue::Integer(_) => "integer",
            RespValue::BulkString(_) => "bulk string",
            RespValue::Null => "nil",
            RespValue::Array(_) => "array",
        }
    }

    /// Serializes the value into its wire representation.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the value, appending to `buf`.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            RespValue::SimpleString(s) => write_line(buf, prefix::SIMPLE_STRING, s.as_bytes()),
            RespValue::Error(s) => write_line(buf, prefix::ERROR, s.as_bytes()),
            RespValue::Integer(n) => write_line(buf, prefix::INTEGER, n.to_string().as_bytes()),
            RespValue::BulkString(data) => {
                write_line(buf, prefix::BULK_STRING, data.len().to_string().as_bytes());
                buf.extend_from_slice(data);
                buf.extend_from_slice(CRLF);
            }
            RespValue::Null => write_line(buf, prefix::BULK_STRING, b"-1"),
            RespValue::Array(values) => {
                write_line(buf, prefix::ARRAY, values.len().to_string().as_bytes());
                for value in values {
                    value.serialize_into(buf);
                }
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RespValue::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RespValue::Error(_))
    }

    /// Text content of a status or a UTF-8 bulk string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RespValue::SimpleString(s) => Some(s),
            RespValue::BulkString(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RespValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<Vec<RespValue>> {
        match self {
            RespValue::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

fn write_line(buf: &mut Vec<u8>, prefix: u8, body: &[u8]) {
    buf.push(prefix);
    buf.extend_from_slice(body);
    buf.extend_from_slice(CRLF);
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::SimpleString(s) => write!(f, "{}", s),
            RespValue::Error(s) => write!(f, "(error) {}", s),
            RespValue::Integer(n) => write!(f, "(integer) {}", n),
            RespValue::BulkString(data) => match std::str::from_utf8(data) {
                Ok(s) => write!(f, "\"{}\"", s),
                Err(_) => write!(f, "(binary data, {} bytes)", data.len()),
            },
            RespValue::Null => write!(f, "(nil)"),
            RespValue::Array(values) if values.is_empty() => write!(f, "(empty array)"),
            RespValue::Array(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {}", i + 1, v)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_error_lines() {
        assert_eq!(RespValue::ok().serialize(), b"+OK\r\n");
        assert_eq!(
            RespValue::error("ERR no such key").serialize(),
            b"-ERR no such key\r\n"
        );
    }

    #[test]
    fn test_integer_serialize() {
        assert_eq!(RespValue::integer(-2).serialize(), b":-2\r\n");
    }

    #[test]
    fn test_binary_bulk_string_serialize() {
        let value = RespValue::bulk_string(Bytes::from_static(b"\x00\r\n\xff"));
        assert_eq!(value.serialize(), b"$4\r\n\x00\r\n\xff\r\n");
    }

    #[test]
    fn test_null_serialize() {
        assert_eq!(RespValue::null().serialize(), b"$-1\r\n");
    }

    #[test]
    fn test_scan_shaped_array_serialize() {
        let value = RespValue::array(vec![
            RespValue::bulk_string("0"),
            RespValue::array(vec![RespValue::bulk_string("a")]),
        ]);
        assert_eq!(value.serialize(), b"*2\r\n$1\r\n0\r\n*1\r\n$1\r\na\r\n");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(RespValue::Null.type_name(), "nil");
        assert_eq!(RespValue::ok().type_name(), "status");
        assert_eq!(RespValue::array(vec![]).type_name(), "array");
    }

    #[test]
    fn test_display_like_cli() {
        assert_eq!(RespValue::integer(3).to_string(), "(integer) 3");
        assert_eq!(RespValue::Null.to_string(), "(nil)");
        let list = RespValue::array(vec![RespValue::bulk_string("a"), RespValue::bulk_string("b")]);
        assert_eq!(list.to_string(), "1) \"a\"\n2) \"b\"");
    }
}
