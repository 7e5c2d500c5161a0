//! Incremental RESP Reply Parser
//!
//! Replies arrive over a stream socket, so a read may hold half a reply or
//! (in theory) more than one. [`ReplyParser::parse`] answers with:
//!
//! - `Ok(Some((value, consumed)))` - one complete reply, `consumed` bytes used
//! - `Ok(None)` - the reply is incomplete, read more and try again
//! - `Err(ParseError)` - the bytes are not valid RESP
//!
//! The dispatcher keeps its read buffer across attempts and advances it by
//! `consumed` once a reply is complete.

use crate::protocol::types::{prefix, RespValue, CRLF};
use bytes::Bytes;
use thiserror::Error;

/// Errors that can occur while decoding a reply.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Unknown type prefix byte
    #[error("unknown type prefix: {0:#04x}")]
    UnknownPrefix(u8),

    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    /// Status, error and length lines must be UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// Negative length other than -1
    #[error("invalid bulk string length: {0}")]
    InvalidBulkLength(i64),

    #[error("invalid array length: {0}")]
    InvalidArrayLength(i64),

    #[error("protocol error: {0}")]
    ProtocolError(String),

    #[error("message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: usize, max: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Largest bulk string a server may send (512 MB, same as Redis)
pub const MAX_BULK_SIZE: usize = 512 * 1024 * 1024;

/// Maximum array nesting depth
pub const MAX_NESTING_DEPTH: usize = 32;

/// Parser for server replies.
///
/// # Example
///
/// ```
/// use flashkv_client::protocol::{ReplyParser, RespValue};
///
/// let mut parser = ReplyParser::new();
/// let (reply, consumed) = parser.parse(b":1\r\n").unwrap().unwrap();
/// assert_eq!(reply, RespValue::Integer(1));
/// assert_eq!(consumed, 4);
/// ```
#[derive(Debug, Default)]
pub struct ReplyParser {
    depth: usize,
}

impl ReplyParser {
    pub fn new() -> Self {
        Self { depth: 0 }
    }

    /// Attempts to decode one reply from the front of `buf`.
    pub fn parse(&mut self, buf: &[u8]) -> ParseResult<Option<(RespValue, usize)>> {
        self.depth = 0;
        self.parse_value(buf)
    }

    fn parse_value(&mut self, buf: &[u8]) -> ParseResult<Option<(RespValue, usize)>> {
        let Some(&first) = buf.first() else {
            return Ok(None);
        };

        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::ProtocolError(format!(
                "maximum nesting depth exceeded: {}",
                MAX_NESTING_DEPTH
            )));
        }

        let Some((line, header_len)) = read_line(buf)? else {
            return Ok(None);
        };

        match first {
            prefix::SIMPLE_STRING => Ok(Some((
                RespValue::SimpleString(line.to_string()),
                header_len,
            ))),
            prefix::ERROR => Ok(Some((RespValue::Error(line.to_string()), header_len))),
            prefix::INTEGER => Ok(Some((RespValue::Integer(parse_int(line)?), header_len))),
            prefix::BULK_STRING => parse_bulk(buf, parse_int(line)?, header_len),
            prefix::ARRAY => self.parse_array(buf, parse_int(line)?, header_len),
            other => Err(ParseError::UnknownPrefix(other)),
        }
    }

    fn parse_array(
        &mut self,
        buf: &[u8],
        count: i64,
        header_len: usize,
    ) -> ParseResult<Option<(RespValue, usize)>> {
        if count == -1 {
            return Ok(Some((RespValue::Null, header_len)));
        }
        if count < 0 {
            return Err(ParseError::InvalidArrayLength(count));
        }

        // Never trust the count for preallocation
        let mut elements = Vec::with_capacity((count as usize).min(1024));
        let mut consumed = header_len;

        self.depth += 1;
        for _ in 0..count {
            match self.parse_value(&buf[consumed..])? {
                Some((value, used)) => {
                    elements.push(value);
                    consumed += used;
                }
                None => return Ok(None),
            }
        }
        self.depth -= 1;

        Ok(Some((RespValue::Array(elements), consumed)))
    }
}

fn parse_bulk(
    buf: &[u8],
    length: i64,
    header_len: usize,
) -> ParseResult<Option<(RespValue, usize)>> {
    if length == -1 {
        return Ok(Some((RespValue::Null, header_len)));
    }
    if length < 0 {
        return Err(ParseError::InvalidBulkLength(length));
    }

    let length = length as usize;
    if length > MAX_BULK_SIZE {
        return Err(ParseError::MessageTooLarge {
            size: length,
            max: MAX_BULK_SIZE,
        });
    }

    let total = header_len + length + CRLF.len();
    if buf.len() < total {
        return Ok(None);
    }
    if &buf[header_len + length..total] != CRLF {
        return Err(ParseError::ProtocolError(
            "bulk string missing trailing CRLF".to_string(),
        ));
    }

    let data = Bytes::copy_from_slice(&buf[header_len..header_len + length]);
    Ok(Some((RespValue::BulkString(data), total)))
}

/// Reads the header line after the prefix byte.
///
/// Returns the line text and the number of bytes including prefix and CRLF.
fn read_line(buf: &[u8]) -> ParseResult<Option<(&str, usize)>> {
    let body = &buf[1..];
    let Some(pos) = body.windows(2).position(|w| w == CRLF) else {
        return Ok(None);
    };
    let line = std::str::from_utf8(&body[..pos]).map_err(|e| ParseError::InvalidUtf8(e.to_string()))?;
    Ok(Some((line, 1 + pos + CRLF.len())))
}

fn parse_int(line: &str) -> ParseResult<i64> {
    line.parse()
        .map_err(|_| ParseError::InvalidInteger(line.to_string()))
}

/// Decodes a single reply with a fresh parser.
pub fn parse_reply(buf: &[u8]) -> ParseResult<Option<(RespValue, usize)>> {
    ReplyParser::new().parse(buf)
}
