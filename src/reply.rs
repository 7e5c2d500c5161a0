//! Reply Decoding
//!
//! Each command narrows the raw [`RespValue`] to its documented return type
//! with one of the rules below. Error replies never reach these functions:
//! [`Client::call`](crate::client::Client::call) turns them into
//! [`ClientError::Server`] first. A reply of any other unexpected shape is
//! [`ClientError::UnexpectedReply`].
//!
//! | Rule              | Accepts                          | Returns                 |
//! |-------------------|----------------------------------|-------------------------|
//! | `integer`         | `:n`                             | `i64`                   |
//! | `boolean`         | `:0` / `:1`                      | `bool`                  |
//! | `ok`              | `+OK`                            | `true`                  |
//! | `status`          | `+text`                          | `String`                |
//! | `nullable_bytes`  | `$data` or nil                   | `Option<Bytes>`         |
//! | `nullable_string` | `$text` or nil                   | `Option<String>`        |
//! | `string_list`     | `*[$text ...]`                   | `Vec<String>`           |
//! | `scan_page`       | `*[$cursor, *[$key ...]]`        | [`ScanPage`]            |
//! | `sort_result`     | `*[...]` or `:n` with STORE      | [`SortResult`]          |

use crate::commands::ObjectSubcommand;
use crate::error::{ClientError, Result};
use crate::protocol::RespValue;
use bytes::Bytes;

/// One page of a `SCAN` iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPage {
    /// Cursor for the next call; `0` when the iteration is complete.
    pub cursor: u64,
    pub keys: Vec<String>,
}

impl ScanPage {
    pub fn is_last(&self) -> bool {
        self.cursor == 0
    }
}

/// What `SORT` returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortResult {
    /// Sorted elements; `None` where a `GET` pattern matched nothing.
    Values(Vec<Option<Bytes>>),
    /// Number of elements written to the `STORE` destination.
    Stored(i64),
}

/// What `OBJECT` returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectInfo {
    /// `REFCOUNT` or `IDLETIME` value
    Count(i64),
    /// `ENCODING` value, e.g. `embstr`
    Encoding(String),
    /// The key does not exist
    Missing,
}

fn unexpected(command: &'static str, expected: &'static str, got: &RespValue) -> ClientError {
    ClientError::UnexpectedReply {
        command,
        expected,
        got: got.type_name().to_string(),
    }
}

fn text(command: &'static str, data: Bytes) -> Result<String> {
    String::from_utf8(data.to_vec()).map_err(|_| ClientError::UnexpectedReply {
        command,
        expected: "UTF-8 text",
        got: "binary data".to_string(),
    })
}

pub fn integer(command: &'static str, reply: RespValue) -> Result<i64> {
    match reply {
        RespValue::Integer(n) => Ok(n),
        other => Err(unexpected(command, "integer", &other)),
    }
}

/// `:1` is true, `:0` is false.
pub fn boolean(command: &'static str, reply: RespValue) -> Result<bool> {
    integer(command, reply).map(|n| n != 0)
}

/// `+OK` is true; any other status is an error.
pub fn ok(command: &'static str, reply: RespValue) -> Result<bool> {
    match reply {
        RespValue::SimpleString(s) if s == "OK" => Ok(true),
        RespValue::SimpleString(s) => Err(ClientError::UnexpectedReply {
            command,
            expected: "OK",
            got: s,
        }),
        other => Err(unexpected(command, "status", &other)),
    }
}

pub fn status(command: &'static str, reply: RespValue) -> Result<String> {
    match reply {
        RespValue::SimpleString(s) => Ok(s),
        other => Err(unexpected(command, "status", &other)),
    }
}

pub fn nullable_bytes(command: &'static str, reply: RespValue) -> Result<Option<Bytes>> {
    match reply {
        RespValue::BulkString(data) => Ok(Some(data)),
        RespValue::Null => Ok(None),
        other => Err(unexpected(command, "bulk string or nil", &other)),
    }
}

pub fn nullable_string(command: &'static str, reply: RespValue) -> Result<Option<String>> {
    nullable_bytes(command, reply)?
        .map(|data| text(command, data))
        .transpose()
}

pub fn string_list(command: &'static str, reply: RespValue) -> Result<Vec<String>> {
    match reply {
        RespValue::Array(items) => items
            .into_iter()
            .map(|item| match item {
                RespValue::BulkString(data) => text(command, data),
                RespValue::SimpleString(s) => Ok(s),
                other => Err(unexpected(command, "array of strings", &other)),
            })
            .collect(),
        other => Err(unexpected(command, "array", &other)),
    }
}

fn nullable_bytes_list(command: &'static str, reply: RespValue) -> Result<Vec<Option<Bytes>>> {
    match reply {
        RespValue::Array(items) => items
            .into_iter()
            .map(|item| nullable_bytes(command, item))
            .collect(),
        other => Err(unexpected(command, "array", &other)),
    }
}

pub fn scan_page(command: &'static str, reply: RespValue) -> Result<ScanPage> {
    let items = match reply {
        RespValue::Array(items) if items.len() == 2 => items,
        other => return Err(unexpected(command, "two-element array", &other)),
    };
    let mut items = items.into_iter();
    let (Some(cursor), Some(keys)) = (items.next(), items.next()) else {
        return Err(ClientError::UnexpectedReply {
            command,
            expected: "two-element array",
            got: "short array".to_string(),
        });
    };

    let cursor = match cursor {
        RespValue::BulkString(data) => text(command, data)?,
        RespValue::Integer(n) => n.to_string(),
        other => return Err(unexpected(command, "cursor", &other)),
    };
    let cursor = cursor.parse().map_err(|_| ClientError::UnexpectedReply {
        command,
        expected: "numeric cursor",
        got: cursor.clone(),
    })?;

    Ok(ScanPage {
        cursor,
        keys: string_list(command, keys)?,
    })
}

pub fn sort_result(command: &'static str, reply: RespValue) -> Result<SortResult> {
    match reply {
        RespValue::Integer(n) => Ok(SortResult::Stored(n)),
        array @ RespValue::Array(_) => nullable_bytes_list(command, array).map(SortResult::Values),
        other => Err(unexpected(command, "array or integer", &other)),
    }
}

/// `MIGRATE` answers `+OK`, or `+NOKEY` when the key was not found.
pub fn migrate_status(command: &'static str, reply: RespValue) -> Result<bool> {
    match reply {
        RespValue::SimpleString(s) if s == "NOKEY" => Ok(false),
        other => ok(command, other),
    }
}

pub fn object_info(
    command: &'static str,
    subcommand: ObjectSubcommand,
    reply: RespValue,
) -> Result<ObjectInfo> {
    match (subcommand, reply) {
        (_, RespValue::Null) => Ok(ObjectInfo::Missing),
        (ObjectSubcommand::Encoding, reply) => {
            let encoding = nullable_string(command, reply)?;
            Ok(encoding.map_or(ObjectInfo::Missing, ObjectInfo::Encoding))
        }
        (_, reply) => integer(command, reply).map(ObjectInfo::Count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_boolean() {
        assert_eq!(integer("TTL", RespValue::integer(-2)).unwrap(), -2);
        assert!(boolean("EXPIRE", RespValue::integer(1)).unwrap());
        assert!(!boolean("EXPIRE", RespValue::integer(0)).unwrap());
        let err = integer("TTL", RespValue::bulk_string("x")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected reply to TTL: expected integer, got bulk string"
        );
    }

    #[test]
    fn test_ok_rule() {
        assert!(ok("RENAME", RespValue::ok()).unwrap());
        assert!(matches!(
            ok("RENAME", RespValue::simple_string("QUEUED")),
            Err(ClientError::UnexpectedReply { got, .. }) if got == "QUEUED"
        ));
        assert!(ok("RENAME", RespValue::integer(1)).is_err());
    }

    #[test]
    fn test_nullable() {
        assert_eq!(nullable_string("RANDOMKEY", RespValue::Null).unwrap(), None);
        assert_eq!(
            nullable_string("RANDOMKEY", RespValue::bulk_string("k")).unwrap(),
            Some("k".to_string())
        );
        let blob = Bytes::from_static(b"\x00\xff");
        assert_eq!(
            nullable_bytes("DUMP", RespValue::BulkString(blob.clone())).unwrap(),
            Some(blob)
        );
        assert!(nullable_string("RANDOMKEY", RespValue::bulk_string(&b"\xff"[..])).is_err());
    }

    #[test]
    fn test_string_list() {
        let reply = RespValue::array(vec![RespValue::bulk_string("a"), RespValue::bulk_string("b")]);
        assert_eq!(string_list("KEYS", reply).unwrap(), ["a", "b"]);
        assert!(string_list("KEYS", RespValue::array(vec![RespValue::Null])).is_err());
    }

    #[test]
    fn test_scan_page() {
        let reply = RespValue::array(vec![
            RespValue::bulk_string("17"),
            RespValue::array(vec![RespValue::bulk_string("user:1")]),
        ]);
        let page = scan_page("SCAN", reply).unwrap();
        assert_eq!(page.cursor, 17);
        assert_eq!(page.keys, ["user:1"]);
        assert!(!page.is_last());

        let done = RespValue::array(vec![RespValue::bulk_string("0"), RespValue::array(vec![])]);
        assert!(scan_page("SCAN", done).unwrap().is_last());
    }

    #[test]
    fn test_scan_page_large_cursor() {
        let reply = RespValue::array(vec![
            RespValue::bulk_string("18446744073709551615"),
            RespValue::array(vec![]),
        ]);
        assert_eq!(scan_page("SCAN", reply).unwrap().cursor, u64::MAX);
    }

    #[test]
    fn test_scan_page_malformed() {
        assert!(scan_page("SCAN", RespValue::array(vec![])).is_err());
        let bad_cursor = RespValue::array(vec![RespValue::bulk_string("x"), RespValue::array(vec![])]);
        assert!(scan_page("SCAN", bad_cursor).is_err());
    }

    #[test]
    fn test_sort_result() {
        let reply = RespValue::array(vec![RespValue::bulk_string("1"), RespValue::Null]);
        assert_eq!(
            sort_result("SORT", reply).unwrap(),
            SortResult::Values(vec![Some(Bytes::from("1")), None])
        );
        assert_eq!(
            sort_result("SORT", RespValue::integer(3)).unwrap(),
            SortResult::Stored(3)
        );
    }

    #[test]
    fn test_migrate_status() {
        assert!(migrate_status("MIGRATE", RespValue::ok()).unwrap());
        assert!(!migrate_status("MIGRATE", RespValue::simple_string("NOKEY")).unwrap());
        assert!(migrate_status("MIGRATE", RespValue::simple_string("MAYBE")).is_err());
    }

    #[test]
    fn test_object_info() {
        assert_eq!(
            object_info("OBJECT", ObjectSubcommand::RefCount, RespValue::integer(1)).unwrap(),
            ObjectInfo::Count(1)
        );
        assert_eq!(
            object_info("OBJECT", ObjectSubcommand::Encoding, RespValue::bulk_string("embstr"))
                .unwrap(),
            ObjectInfo::Encoding("embstr".to_string())
        );
        assert_eq!(
            object_info("OBJECT", ObjectSubcommand::IdleTime, RespValue::Null).unwrap(),
            ObjectInfo::Missing
        );
    }
}
