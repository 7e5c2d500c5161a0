//! Error types for the FlashKV client
//!
//! Three families, matching where a call can fail:
//!
//! - [`ValidationError`]: an argument was rejected before anything was sent
//! - [`ServerError`]: the server answered with an error reply
//! - transport failures: I/O, malformed replies, closed connections
//!
//! [`ClientError`] wraps all of them; [`ClientError::kind`] tells them apart.

use crate::protocol::ParseError;
use std::fmt;
use thiserror::Error;

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// An argument failed its parameter rule. Nothing was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid argument `{param}`: key must not be empty")]
    EmptyKey { param: &'static str },

    #[error("invalid argument `{param}`: expected a string, got {found}")]
    NotAString {
        param: &'static str,
        found: &'static str,
    },

    #[error("invalid argument `{param}`: key list must not be empty")]
    EmptyKeyList { param: &'static str },

    #[error("invalid argument `{param}`: {value:?} is not an integer")]
    NotAnInteger { param: &'static str, value: String },

    #[error("invalid argument `{param}`: port {port} is outside 1..=65535")]
    PortOutOfRange { param: &'static str, port: String },

    #[error("invalid argument `{param}`: {value:?} is not one of {allowed}")]
    NotAllowed {
        param: &'static str,
        value: String,
        allowed: String,
    },

    #[error("invalid argument `{param}`: limit must be a count or an (offset, count) pair")]
    MalformedLimit { param: &'static str },

    #[error("invalid argument `{param}`: expected a scalar, got a list")]
    NotScalar { param: &'static str },
}

impl ValidationError {
    /// Name of the argument that was rejected.
    pub fn param(&self) -> &'static str {
        match self {
            ValidationError::EmptyKey { param }
            | ValidationError::NotAString { param, .. }
            | ValidationError::EmptyKeyList { param }
            | ValidationError::NotAnInteger { param, .. }
            | ValidationError::PortOutOfRange { param, .. }
            | ValidationError::NotAllowed { param, .. }
            | ValidationError::MalformedLimit { param }
            | ValidationError::NotScalar { param } => param,
        }
    }
}

/// An error reply (`-CODE message`) sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    code: String,
    message: String,
}

impl ServerError {
    /// Splits an error line into its code and message.
    ///
    /// The code is the leading word when it is all upper-case
    /// (`WRONGTYPE`, `ERR`, `NOSCRIPT`); otherwise the code is `ERR`
    /// and the whole line is the message.
    pub fn from_line(line: &str) -> Self {
        let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
        let is_code = !head.is_empty()
            && head
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '-');

        if is_code {
            Self {
                code: head.to_string(),
                message: rest.to_string(),
            }
        } else {
            Self {
                code: "ERR".to_string(),
                message: line.to_string(),
            }
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ServerError {}

/// Which family an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any I/O
    Validation,
    /// The server answered with an error, or with a reply the command cannot decode
    Protocol,
    /// The connection failed or produced unreadable bytes
    Transport,
}

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),

    #[error("server error: {0}")]
    Server(#[from] ServerError),

    #[error("unexpected reply to {command}: expected {expected}, got {got}")]
    UnexpectedReply {
        command: &'static str,
        expected: &'static str,
        got: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed reply: {0}")]
    Parse(#[from] ParseError),

    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("reply exceeds {max} bytes")]
    ReplyTooLarge { max: usize },

    /// An earlier request was interrupted or failed before its reply was
    /// read, so replies can no longer be matched to requests.
    #[error("connection is out of step with the server after an interrupted request")]
    Poisoned,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidArgument(_) => ErrorKind::Validation,
            ClientError::Server(_) | ClientError::UnexpectedReply { .. } => ErrorKind::Protocol,
            ClientError::Io(_)
            | ClientError::Parse(_)
            | ClientError::ConnectionClosed
            | ClientError::ReplyTooLarge { .. }
            | ClientError::Poisoned => ErrorKind::Transport,
        }
    }

    /// The server error, if this is one.
    pub fn server_error(&self) -> Option<&ServerError> {
        match self {
            ClientError::Server(e) => Some(e),
            _ => None,
        }
    }
}
