//! Command Assembly
//!
//! A [`Command`] is a verb plus the flattened tokens of its parameters, in
//! the exact order they go on the wire. [`CommandBuilder`] covers the three
//! shapes the keyspace commands need:
//!
//! ```text
//!   fixed arity         RENAME  key newkey
//!   conditional flags   MIGRATE host port key db timeout [COPY] [REPLACE]
//!   repeated groups     SORT key [GET p1] [GET p2] ...
//! ```
//!
//! The builder does no validation of its own: it only accepts
//! [`Parameter`]s, which are validated by construction.
//!
//! ## Wire Format
//!
//! `Command::encode` frames the command as a multi-bulk request, verb first:
//!
//! ```text
//! *3\r\n$6\r\nEXPIRE\r\n$10\r\nsession:42\r\n$2\r\n30\r\n
//! ```

use crate::params::Parameter;
use crate::protocol::types::{prefix, RespValue, CRLF};
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

/// An assembled request, ready to frame and send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: &'static str,
    args: Vec<Bytes>,
}

impl Command {
    /// The protocol verb, e.g. `EXPIRE`.
    pub fn verb(&self) -> &'static str {
        self.verb
    }

    /// Argument tokens after the verb.
    pub fn args(&self) -> &[Bytes] {
        &self.args
    }

    /// Number of tokens on the wire, verb included.
    pub fn len(&self) -> usize {
        self.args.len() + 1
    }

    /// Always false: the verb is a token.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over every token, verb first.
    pub fn tokens(&self) -> impl Iterator<Item = &[u8]> + '_ {
        std::iter::once(self.verb.as_bytes()).chain(self.args.iter().map(|a| &a[..]))
    }

    /// The request as an array of bulk strings.
    pub fn to_resp(&self) -> RespValue {
        RespValue::Array(
            std::iter::once(Bytes::from_static(self.verb.as_bytes()))
                .chain(self.args.iter().cloned())
                .map(RespValue::BulkString)
                .collect(),
        )
    }

    /// Frames the command as a multi-bulk request.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Frames the command, appending to `buf`.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_u8(prefix::ARRAY);
        buf.put_slice(self.len().to_string().as_bytes());
        buf.put_slice(CRLF);
        for token in self.tokens() {
            buf.put_u8(prefix::BULK_STRING);
            buf.put_slice(token.len().to_string().as_bytes());
            buf.put_slice(CRLF);
            buf.put_slice(token);
            buf.put_slice(CRLF);
        }
    }

    /// Exact size of the framed request.
    pub fn encoded_len(&self) -> usize {
        let header = 1 + decimal_len(self.len()) + CRLF.len();
        header
            + self
                .tokens()
                .map(|t| 1 + decimal_len(t.len()) + CRLF.len() + t.len() + CRLF.len())
                .sum::<usize>()
    }
}

fn decimal_len(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        for arg in &self.args {
            write!(f, " {}", String::from_utf8_lossy(arg))?;
        }
        Ok(())
    }
}

/// Assembles a [`Command`] from validated parameters, in call order.
///
/// # Example
///
/// ```
/// use flashkv_client::command::CommandBuilder;
/// use flashkv_client::params;
///
/// let cmd = CommandBuilder::new("SCAN")
///     .param(params::integer("cursor", 0)?)
///     .option("MATCH", Some(params::plain("pattern", "user:*")?))
///     .option("COUNT", None)
///     .build();
/// assert_eq!(cmd.to_string(), "SCAN 0 MATCH user:*");
/// # Ok::<(), flashkv_client::ValidationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    verb: &'static str,
    args: Vec<Bytes>,
}

impl CommandBuilder {
    pub fn new(verb: &'static str) -> Self {
        Self {
            verb,
            args: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn param(mut self, param: Parameter) -> Self {
        self.args.extend(param.into_tokens());
        self
    }

    /// Appends a literal keyword.
    pub fn flag(self, flag: &'static str) -> Self {
        self.param(Parameter::keyword(flag))
    }

    /// Appends `flag` only when `enabled`.
    pub fn flag_if(self, enabled: bool, flag: &'static str) -> Self {
        if enabled {
            self.flag(flag)
        } else {
            self
        }
    }

    /// Appends `keyword value` when a value is present.
    pub fn option(self, keyword: &'static str, value: Option<Parameter>) -> Self {
        match value {
            Some(value) => self.flag(keyword).param(value),
            None => self,
        }
    }

    /// Appends `keyword value` once per value, in iteration order.
    pub fn repeated<I>(self, keyword: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = Parameter>,
    {
        values
            .into_iter()
            .fold(self, |builder, value| builder.flag(keyword).param(value))
    }

    pub fn build(self) -> Command {
        Command {
            verb: self.verb,
            args: self.args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use crate::protocol::parse_reply;

    fn words(cmd: &Command) -> Vec<String> {
        cmd.tokens()
            .map(|t| String::from_utf8_lossy(t).into_owned())
            .collect()
    }

    #[test]
    fn test_fixed_arity() {
        let cmd = CommandBuilder::new("RENAME")
            .param(params::key("key", "old").unwrap())
            .param(params::key("newkey", "new").unwrap())
            .build();
        assert_eq!(words(&cmd), ["RENAME", "old", "new"]);
        assert_eq!(cmd.len(), 3);
    }

    #[test]
    fn test_conditional_flags_keep_fixed_order() {
        let build = |copy, replace| {
            CommandBuilder::new("MIGRATE")
                .param(params::key("key", "k").unwrap())
                .flag_if(copy, "COPY")
                .flag_if(replace, "REPLACE")
                .build()
        };
        assert_eq!(words(&build(true, false)), ["MIGRATE", "k", "COPY"]);
        assert_eq!(words(&build(true, true)), ["MIGRATE", "k", "COPY", "REPLACE"]);
        assert_eq!(words(&build(false, true)), ["MIGRATE", "k", "REPLACE"]);
        assert_eq!(words(&build(false, false)), ["MIGRATE", "k"]);
    }

    #[test]
    fn test_repeated_groups_keep_input_order() {
        let patterns = ["w1", "w2"]
            .into_iter()
            .map(|p| params::plain("get", p).unwrap());
        let cmd = CommandBuilder::new("SORT")
            .param(params::key("key", "list").unwrap())
            .repeated("GET", patterns)
            .build();
        assert_eq!(words(&cmd), ["SORT", "list", "GET", "w1", "GET", "w2"]);
    }

    #[test]
    fn test_multi_token_parameter_is_flattened() {
        let cmd = CommandBuilder::new("SORT")
            .param(params::key("key", "list").unwrap())
            .option("LIMIT", Some(params::limit("limit", (5, 10)).unwrap()))
            .build();
        assert_eq!(words(&cmd), ["SORT", "list", "LIMIT", "5", "10"]);
    }

    #[test]
    fn test_encode_expire() {
        let cmd = CommandBuilder::new("EXPIRE")
            .param(params::key("key", "session:42").unwrap())
            .param(params::integer("seconds", 30).unwrap())
            .build();
        let expected: &[u8] = b"*3\r\n$6\r\nEXPIRE\r\n$10\r\nsession:42\r\n$2\r\n30\r\n";
        assert_eq!(&cmd.encode()[..], expected);
        assert_eq!(cmd.encoded_len(), expected.len());
    }

    #[test]
    fn test_encode_no_args() {
        let cmd = CommandBuilder::new("RANDOMKEY").build();
        assert_eq!(&cmd.encode()[..], b"*1\r\n$9\r\nRANDOMKEY\r\n");
        assert!(cmd.args().is_empty());
    }

    #[test]
    fn test_binary_token_survives_framing() {
        let payload = Bytes::from_static(b"\x00\r\n\xff");
        let cmd = CommandBuilder::new("RESTORE")
            .param(params::key("key", "k").unwrap())
            .param(Parameter::raw(payload.clone()))
            .build();
        let (frame, _) = parse_reply(&cmd.encode()).unwrap().unwrap();
        assert_eq!(frame, cmd.to_resp());
        assert_eq!(cmd.args()[1], payload);
    }

    #[test]
    fn test_encode_into_appends() {
        let mut buf = BytesMut::from(&b"xx"[..]);
        CommandBuilder::new("TTL")
            .param(params::key("key", "a").unwrap())
            .build()
            .encode_into(&mut buf);
        assert_eq!(&buf[..], b"xx*2\r\n$3\r\nTTL\r\n$1\r\na\r\n");
    }

    #[test]
    fn test_display() {
        let cmd = CommandBuilder::new("DEL")
            .param(params::key_list("keys", vec!["a", "b"]).unwrap())
            .build();
        assert_eq!(cmd.to_string(), "DEL a b");
    }

    #[test]
    fn test_decimal_len() {
        assert_eq!(decimal_len(0), 1);
        assert_eq!(decimal_len(9), 1);
        assert_eq!(decimal_len(10), 2);
        assert_eq!(decimal_len(12345), 5);
    }
}
