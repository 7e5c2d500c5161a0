//! RESP Protocol Support
//!
//! The client side of the Redis Serialization Protocol: the reply value type
//! and an incremental parser for server replies. Request framing lives on
//! [`Command`](crate::command::Command).
//!
//! ## Modules
//!
//! - `types`: the `RespValue` reply union and its serialization
//! - `parser`: incremental parser for replies read off a socket

pub mod parser;
pub mod types;

pub use parser::{parse_reply, ParseError, ParseResult, ReplyParser};
pub use types::RespValue;
