//! Parameter kinds and their validation rules
//!
//! Each [`ParamKind`] turns one [`Arg`] into a [`Parameter`]: one or more
//! wire tokens, or a [`ValidationError`] naming the argument.
//!
//! | Kind          | Accepts                          | Tokens            |
//! |---------------|----------------------------------|-------------------|
//! | `Key`         | non-empty string                 | 1                 |
//! | `KeyList`     | string, or non-empty list of them| N, order kept     |
//! | `Integer`     | integer, numeric string          | 1, decimal text   |
//! | `PortNumber`  | integer in 1..=65535             | 1                 |
//! | `PlainString` | any scalar                       | 1, verbatim       |
//! | `Enum`        | exact, case-sensitive match      | 1                 |
//! | `LimitSpec`   | count, or (offset, count)        | 2                 |

use crate::error::ValidationError;
use crate::params::Arg;
use bytes::Bytes;

/// A validation strategy for one command argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Key,
    KeyList,
    Integer,
    PortNumber,
    PlainString,
    /// One of a fixed set of protocol words
    Enum(&'static [&'static str]),
    /// `LIMIT` arguments: offset and count
    LimitSpec,
}

/// One validated argument: a non-empty, ordered run of wire tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    tokens: Vec<Bytes>,
}

impl Parameter {
    fn single(token: Bytes) -> Self {
        Self {
            tokens: vec![token],
        }
    }

    /// A literal protocol word such as `COPY` or `MATCH`.
    pub fn keyword(word: &'static str) -> Self {
        Self::single(Bytes::from_static(word.as_bytes()))
    }

    /// Binary data passed through untouched (e.g. a DUMP payload).
    pub fn raw(data: impl Into<Bytes>) -> Self {
        Self::single(data.into())
    }

    pub fn tokens(&self) -> &[Bytes] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Bytes> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl ParamKind {
    /// Validates `arg` under this kind. `param` names the argument in errors.
    pub fn validate(&self, param: &'static str, arg: Arg) -> Result<Parameter, ValidationError> {
        match self {
            ParamKind::Key => key_token(param, arg).map(Parameter::single),
            ParamKind::KeyList => {
                let items = match arg {
                    Arg::List(items) => items,
                    scalar => vec![scalar],
                };
                if items.is_empty() {
                    return Err(ValidationError::EmptyKeyList { param });
                }
                let tokens = items
                    .into_iter()
                    .map(|item| key_token(param, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Parameter { tokens })
            }
            ParamKind::Integer => integer_text(param, &arg).map(|n| Parameter::single(Bytes::from(n))),
            ParamKind::PortNumber => {
                port_number(param, arg).map(|p| Parameter::single(Bytes::from(p.to_string())))
            }
            ParamKind::PlainString => match arg {
                Arg::Text(b) => Ok(Parameter::single(b)),
                Arg::Int(n) => Ok(Parameter::single(Bytes::from(n.to_string()))),
                Arg::Float(f) => Ok(Parameter::single(Bytes::from(f.to_string()))),
                Arg::List(_) => Err(ValidationError::NotScalar { param }),
            },
            ParamKind::Enum(allowed) => {
                let matched = match &arg {
                    Arg::Text(b) => allowed.iter().find(|word| word.as_bytes() == &b[..]),
                    _ => None,
                };
                match matched {
                    Some(word) => Ok(Parameter::keyword(*word)),
                    None => Err(ValidationError::NotAllowed {
                        param,
                        value: arg.describe(),
                        allowed: allowed.join(", "),
                    }),
                }
            }
            ParamKind::LimitSpec => {
                let (offset, count) = match arg {
                    Arg::List(items) if items.len() == 2 => {
                        let mut items = items.into_iter();
                        match (items.next(), items.next()) {
                            (Some(offset), Some(count)) => (offset, count),
                            _ => return Err(ValidationError::MalformedLimit { param }),
                        }
                    }
                    Arg::List(_) => return Err(ValidationError::MalformedLimit { param }),
                    count => (Arg::Int(0), count),
                };
                let offset = integer_text(param, &offset)
                    .map_err(|_| ValidationError::MalformedLimit { param })?;
                let count = integer_text(param, &count)
                    .map_err(|_| ValidationError::MalformedLimit { param })?;
                Ok(Parameter {
                    tokens: vec![Bytes::from(offset), Bytes::from(count)],
                })
            }
        }
    }
}

fn key_token(param: &'static str, arg: Arg) -> Result<Bytes, ValidationError> {
    match arg {
        Arg::Text(b) if b.is_empty() => Err(ValidationError::EmptyKey { param }),
        Arg::Text(b) => Ok(b),
        other => Err(ValidationError::NotAString {
            param,
            found: other.shape(),
        }),
    }
}

/// Canonical decimal text of an integer argument.
///
/// Accepts the full signed and unsigned 64-bit range so that SCAN cursors
/// above `i64::MAX` survive.
fn integer_value(param: &'static str, arg: &Arg) -> Result<i128, ValidationError> {
    let not_an_integer = || ValidationError::NotAnInteger {
        param,
        value: arg.describe(),
    };
    let value = match arg {
        Arg::Int(n) => i128::from(*n),
        Arg::Float(f) if f.is_finite() && f.fract() == 0.0 => *f as i128,
        Arg::Float(_) | Arg::List(_) => return Err(not_an_integer()),
        Arg::Text(b) => std::str::from_utf8(b)
            .ok()
            .and_then(|s| s.parse::<i128>().ok())
            .ok_or_else(not_an_integer)?,
    };
    if value < i128::from(i64::MIN) || value > i128::from(u64::MAX) {
        return Err(not_an_integer());
    }
    Ok(value)
}

fn integer_text(param: &'static str, arg: &Arg) -> Result<String, ValidationError> {
    integer_value(param, arg).map(|n| n.to_string())
}

/// Validates a TCP port and returns it as `u16`.
pub fn port_number(param: &'static str, arg: impl Into<Arg>) -> Result<u16, ValidationError> {
    let arg = arg.into();
    let value = integer_value(param, &arg)?;
    match u16::try_from(value) {
        Ok(port) if port >= 1 => Ok(port),
        _ => Err(ValidationError::PortOutOfRange {
            param,
            port: value.to_string(),
        }),
    }
}

pub fn key(param: &'static str, arg: impl Into<Arg>) -> Result<Parameter, ValidationError> {
    ParamKind::Key.validate(param, arg.into())
}

pub fn key_list(param: &'static str, arg: impl Into<Arg>) -> Result<Parameter, ValidationError> {
    ParamKind::KeyList.validate(param, arg.into())
}

pub fn integer(param: &'static str, arg: impl Into<Arg>) -> Result<Parameter, ValidationError> {
    ParamKind::Integer.validate(param, arg.into())
}

pub fn port(param: &'static str, arg: impl Into<Arg>) -> Result<Parameter, ValidationError> {
    ParamKind::PortNumber.validate(param, arg.into())
}

pub fn plain(param: &'static str, arg: impl Into<Arg>) -> Result<Parameter, ValidationError> {
    ParamKind::PlainString.validate(param, arg.into())
}

pub fn one_of(
    param: &'static str,
    allowed: &'static [&'static str],
    arg: impl Into<Arg>,
) -> Result<Parameter, ValidationError> {
    ParamKind::Enum(allowed).validate(param, arg.into())
}

pub fn limit(param: &'static str, arg: impl Into<Arg>) -> Result<Parameter, ValidationError> {
    ParamKind::LimitSpec.validate(param, arg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(p: &Parameter) -> Vec<&str> {
        p.tokens()
            .iter()
            .map(|t| std::str::from_utf8(t).unwrap())
            .collect()
    }

    #[test]
    fn test_key_is_identity() {
        for k in ["session:42", "a", "with space", "ünïcode"] {
            let p = key("key", k).unwrap();
            assert_eq!(p.tokens(), &[Bytes::from(k.to_string())]);
        }
    }

    #[test]
    fn test_key_rejects_empty_and_non_strings() {
        assert_eq!(
            key("key", ""),
            Err(ValidationError::EmptyKey { param: "key" })
        );
        assert_eq!(
            key("key", 5),
            Err(ValidationError::NotAString {
                param: "key",
                found: "an integer"
            })
        );
    }

    #[test]
    fn test_key_list_scalar_equals_singleton() {
        assert_eq!(key_list("keys", "s").unwrap(), key_list("keys", vec!["s"]).unwrap());
    }

    #[test]
    fn test_key_list_keeps_order() {
        let p = key_list("keys", vec!["c", "a", "b"]).unwrap();
        assert_eq!(texts(&p), ["c", "a", "b"]);
    }

    #[test]
    fn test_key_list_rejects_empty_sequence_and_empty_member() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            key_list("keys", empty),
            Err(ValidationError::EmptyKeyList { param: "keys" })
        );
        assert_eq!(
            key_list("keys", vec!["a", ""]),
            Err(ValidationError::EmptyKey { param: "keys" })
        );
    }

    #[test]
    fn test_integer_accepts_numbers_and_numeric_text() {
        assert_eq!(texts(&integer("n", 42).unwrap()), ["42"]);
        assert_eq!(texts(&integer("n", "42").unwrap()), ["42"]);
        assert_eq!(texts(&integer("n", "-7").unwrap()), ["-7"]);
        assert_eq!(texts(&integer("n", "+5").unwrap()), ["5"]);
        assert_eq!(texts(&integer("n", 30.0).unwrap()), ["30"]);
        assert_eq!(
            texts(&integer("cursor", u64::MAX).unwrap()),
            ["18446744073709551615"]
        );
    }

    #[test]
    fn test_integer_rejects_non_numeric() {
        for bad in ["12a", "", "1.5", " 1"] {
            assert!(matches!(
                integer("n", bad),
                Err(ValidationError::NotAnInteger { .. })
            ));
        }
        assert!(integer("n", 1.5).is_err());
        assert!(integer("n", vec![1]).is_err());
        assert!(integer("n", "18446744073709551616").is_err());
    }

    #[test]
    fn test_port_bounds() {
        assert!(port("port", 0).is_err());
        assert!(port("port", 65536).is_err());
        assert_eq!(texts(&port("port", 1).unwrap()), ["1"]);
        assert_eq!(texts(&port("port", 65535).unwrap()), ["65535"]);
        assert_eq!(port_number("port", "6379"), Ok(6379));
        assert_eq!(
            port_number("port", -1),
            Err(ValidationError::PortOutOfRange {
                param: "port",
                port: "-1".to_string()
            })
        );
    }

    #[test]
    fn test_plain_string_verbatim() {
        assert_eq!(texts(&plain("pattern", "user:*").unwrap()), ["user:*"]);
        assert_eq!(texts(&plain("value", 12).unwrap()), ["12"]);
        let raw = plain("value", Arg::bytes(&b"a\r\nb"[..])).unwrap();
        assert_eq!(raw.tokens(), &[Bytes::from_static(b"a\r\nb")]);
        assert_eq!(
            plain("value", vec!["a"]),
            Err(ValidationError::NotScalar { param: "value" })
        );
    }

    #[test]
    fn test_enum_is_case_sensitive() {
        const OBJECT: &[&str] = &["REFCOUNT", "ENCODING", "IDLETIME"];
        assert_eq!(texts(&one_of("subcommand", OBJECT, "REFCOUNT").unwrap()), ["REFCOUNT"]);
        let err = one_of("subcommand", OBJECT, "refcount").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotAllowed {
                param: "subcommand",
                value: "refcount".to_string(),
                allowed: "REFCOUNT, ENCODING, IDLETIME".to_string(),
            }
        );
    }

    #[test]
    fn test_limit_shapes() {
        assert_eq!(texts(&limit("limit", 10).unwrap()), ["0", "10"]);
        assert_eq!(texts(&limit("limit", (5, 10)).unwrap()), ["5", "10"]);
        assert_eq!(texts(&limit("limit", vec!["5", "10"]).unwrap()), ["5", "10"]);
        assert_eq!(
            limit("limit", vec![1, 2, 3]),
            Err(ValidationError::MalformedLimit { param: "limit" })
        );
        assert_eq!(
            limit("limit", (1, "x")),
            Err(ValidationError::MalformedLimit { param: "limit" })
        );
        assert!(limit("limit", "ten").is_err());
    }

    #[test]
    fn test_raw_and_keyword() {
        assert_eq!(Parameter::keyword("COPY").tokens(), &[Bytes::from_static(b"COPY")]);
        let blob = Bytes::from_static(b"\x00\x09\xff");
        assert_eq!(Parameter::raw(blob.clone()).into_tokens(), vec![blob]);
    }
}
