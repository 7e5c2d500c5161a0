//! Option objects for commands with optional clauses.
//!
//! Optional protocol clauses are named fields instead of positional
//! booleans: `MigrateOptions { copy: true, ..Default::default() }` rather
//! than `migrate(..., true, false)`.

use crate::error::ValidationError;
use crate::params::Arg;

/// Suffix flags for `MIGRATE`. Emitted as `COPY` then `REPLACE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Keep the key on the source instance.
    pub copy: bool,
    /// Overwrite the key on the destination.
    pub replace: bool,
}

/// Suffix flags for `RESTORE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreOptions {
    pub replace: bool,
}

/// `MATCH` and `COUNT` clauses for `SCAN`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOptions {
    pub pattern: Option<Arg>,
    pub count: Option<Arg>,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(mut self, pattern: impl Into<Arg>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn count(mut self, count: impl Into<Arg>) -> Self {
        self.count = Some(count.into());
        self
    }
}

/// Sort direction for `SORT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Clauses for `SORT`.
///
/// Emitted in protocol order regardless of the order they were set:
/// `BY`, `LIMIT`, each `GET`, `ASC`/`DESC`, `ALPHA`, `STORE`.
///
/// # Example
///
/// ```
/// use flashkv_client::commands::{self, SortOptions};
///
/// let opts = SortOptions::new().by("weight_*").limit((0, 10)).get("#").get("name_*").alpha();
/// let cmd = commands::sort("ids", &opts).unwrap();
/// assert_eq!(
///     cmd.to_string(),
///     "SORT ids BY weight_* LIMIT 0 10 GET # GET name_* ALPHA"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortOptions {
    pub by: Option<Arg>,
    /// A count, or an `(offset, count)` pair
    pub limit: Option<Arg>,
    pub get: Vec<Arg>,
    pub order: Option<SortOrder>,
    pub alpha: bool,
    pub store: Option<Arg>,
}

impl SortOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(mut self, pattern: impl Into<Arg>) -> Self {
        self.by = Some(pattern.into());
        self
    }

    pub fn limit(mut self, limit: impl Into<Arg>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Adds one `GET` pattern. Patterns are sent in the order added.
    pub fn get(mut self, pattern: impl Into<Arg>) -> Self {
        self.get.push(pattern.into());
        self
    }

    pub fn asc(mut self) -> Self {
        self.order = Some(SortOrder::Asc);
        self
    }

    pub fn desc(mut self) -> Self {
        self.order = Some(SortOrder::Desc);
        self
    }

    pub fn alpha(mut self) -> Self {
        self.alpha = true;
        self
    }

    pub fn store(mut self, destination: impl Into<Arg>) -> Self {
        self.store = Some(destination.into());
        self
    }
}

/// Subcommands of `OBJECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSubcommand {
    RefCount,
    Encoding,
    IdleTime,
}

impl ObjectSubcommand {
    /// Protocol words accepted by `OBJECT`, case-sensitive.
    pub const ALL: &'static [&'static str] = &["REFCOUNT", "ENCODING", "IDLETIME"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectSubcommand::RefCount => "REFCOUNT",
            ObjectSubcommand::Encoding => "ENCODING",
            ObjectSubcommand::IdleTime => "IDLETIME",
        }
    }

    /// Resolves a caller-supplied subcommand, case-sensitively.
    ///
    /// ```
    /// use flashkv_client::commands::ObjectSubcommand;
    ///
    /// assert_eq!(ObjectSubcommand::parse("IDLETIME"), Ok(ObjectSubcommand::IdleTime));
    /// assert!(ObjectSubcommand::parse("idletime").is_err());
    /// ```
    pub fn parse(arg: impl Into<Arg>) -> Result<Self, ValidationError> {
        let arg = arg.into();
        let matched = match &arg {
            Arg::Text(word) => Self::from_token(word),
            _ => None,
        };
        matched.ok_or_else(|| ValidationError::NotAllowed {
            param: "subcommand",
            value: arg.describe(),
            allowed: Self::ALL.join(", "),
        })
    }

    fn from_token(token: &[u8]) -> Option<Self> {
        match token {
            b"REFCOUNT" => Some(ObjectSubcommand::RefCount),
            b"ENCODING" => Some(ObjectSubcommand::Encoding),
            b"IDLETIME" => Some(ObjectSubcommand::IdleTime),
            _ => None,
        }
    }
}

impl From<ObjectSubcommand> for Arg {
    fn from(sub: ObjectSubcommand) -> Self {
        Arg::from(sub.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_subcommand_parse() {
        for (word, sub) in [
            ("REFCOUNT", ObjectSubcommand::RefCount),
            ("ENCODING", ObjectSubcommand::Encoding),
            ("IDLETIME", ObjectSubcommand::IdleTime),
        ] {
            assert_eq!(ObjectSubcommand::parse(word), Ok(sub));
            assert_eq!(sub.as_str(), word);
        }
        assert_eq!(
            ObjectSubcommand::parse(ObjectSubcommand::Encoding),
            Ok(ObjectSubcommand::Encoding)
        );
    }

    #[test]
    fn test_object_subcommand_rejects_unknown() {
        assert_eq!(
            ObjectSubcommand::parse("refcount"),
            Err(ValidationError::NotAllowed {
                param: "subcommand",
                value: "refcount".to_string(),
                allowed: "REFCOUNT, ENCODING, IDLETIME".to_string(),
            })
        );
        assert!(ObjectSubcommand::parse(1).is_err());
        assert!(ObjectSubcommand::parse("FREQ").is_err());
    }

    #[test]
    fn test_sort_options_builder() {
        let opts = SortOptions::new().desc().asc().get("a").get("b");
        assert_eq!(opts.order, Some(SortOrder::Asc));
        assert_eq!(opts.get, vec![Arg::from("a"), Arg::from("b")]);
    }
}
