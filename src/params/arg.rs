//! Raw argument values
//!
//! [`Arg`] is what callers hand to a parameter rule before validation.
//! Commands accept `impl Into<Arg>`, so a key list can be a single `&str`
//! or a `Vec<String>`, and an integer can be `42` or `"42"`.

use bytes::Bytes;

/// An unvalidated argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i64),
    Float(f64),
    /// Text or binary data
    Text(Bytes),
    /// An ordered sequence, also used for pairs
    List(Vec<Arg>),
}

impl Arg {
    /// Wraps arbitrary bytes.
    pub fn bytes(data: impl Into<Bytes>) -> Self {
        Arg::Text(data.into())
    }

    /// Short name of the shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Arg::Int(_) => "an integer",
            Arg::Float(_) => "a float",
            Arg::Text(_) => "a string",
            Arg::List(_) => "a list",
        }
    }

    /// Human-readable rendering for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Arg::Int(n) => n.to_string(),
            Arg::Float(f) => f.to_string(),
            Arg::Text(b) => String::from_utf8_lossy(b).into_owned(),
            Arg::List(items) => {
                let parts: Vec<String> = items.iter().map(Arg::describe).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::from(s.as_str())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(Bytes::from(s))
    }
}

impl From<Bytes> for Arg {
    fn from(b: Bytes) -> Self {
        Arg::Text(b)
    }
}

// Byte sequences are binary text, never lists of small integers.
impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Arg::Text(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Arg {
    fn from(b: Vec<u8>) -> Self {
        Arg::Text(Bytes::from(b))
    }
}

impl<const N: usize> From<&[u8; N]> for Arg {
    fn from(b: &[u8; N]) -> Self {
        Arg::Text(Bytes::copy_from_slice(b))
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Arg::Float(f)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(n: $t) -> Self {
                Arg::Int(i64::from(n))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(n: $t) -> Self {
                match i64::try_from(n) {
                    Ok(n) => Arg::Int(n),
                    Err(_) => Arg::Text(Bytes::from(n.to_string())),
                }
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, u16, u32);
impl_from_unsigned!(u64, usize);

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(items: [T; N]) -> Self {
        Arg::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg> + Clone> From<&[T]> for Arg {
    fn from(items: &[T]) -> Self {
        Arg::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<A: Into<Arg>, B: Into<Arg>> From<(A, B)> for Arg {
    fn from((a, b): (A, B)) -> Self {
        Arg::List(vec![a.into(), b.into()])
    }
}
