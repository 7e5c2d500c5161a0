//! Keyspace command builders
//!
//! One function per verb. Each validates its arguments, applies the verb's
//! optional clauses and returns the assembled [`Command`]. Nothing here does
//! I/O; [`Client`](crate::client::Client) pairs each builder with its reply
//! rule.

use crate::command::{Command, CommandBuilder};
use crate::commands::options::{
    MigrateOptions, ObjectSubcommand, RestoreOptions, ScanOptions, SortOptions,
};
use crate::error::ValidationError;
use crate::params::{self, Arg, Parameter};
use bytes::Bytes;

type Result<T> = std::result::Result<T, ValidationError>;

/// DEL key [key ...]
pub fn del(keys: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("DEL")
        .param(params::key_list("keys", keys)?)
        .build())
}

/// DUMP key
pub fn dump(key: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("DUMP")
        .param(params::key("key", key)?)
        .build())
}

/// EXISTS key [key ...]
pub fn exists(keys: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("EXISTS")
        .param(params::key_list("keys", keys)?)
        .build())
}

/// EXPIRE key seconds
pub fn expire(key: impl Into<Arg>, seconds: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("EXPIRE")
        .param(params::key("key", key)?)
        .param(params::integer("seconds", seconds)?)
        .build())
}

/// EXPIREAT key unix-time-seconds
pub fn expireat(key: impl Into<Arg>, timestamp: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("EXPIREAT")
        .param(params::key("key", key)?)
        .param(params::integer("timestamp", timestamp)?)
        .build())
}

/// KEYS pattern
pub fn keys(pattern: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("KEYS")
        .param(params::plain("pattern", pattern)?)
        .build())
}

/// MIGRATE host port key destination-db timeout [COPY] [REPLACE]
///
/// `timeout` is milliseconds and is only forwarded to the server.
pub fn migrate(
    host: impl Into<Arg>,
    port: impl Into<Arg>,
    key: impl Into<Arg>,
    destination_db: impl Into<Arg>,
    timeout: impl Into<Arg>,
    options: MigrateOptions,
) -> Result<Command> {
    Ok(CommandBuilder::new("MIGRATE")
        .param(params::plain("host", host)?)
        .param(params::port("port", port)?)
        .param(params::key("key", key)?)
        .param(params::integer("destination_db", destination_db)?)
        .param(params::integer("timeout", timeout)?)
        .flag_if(options.copy, "COPY")
        .flag_if(options.replace, "REPLACE")
        .build())
}

/// MOVE key db
pub fn move_key(key: impl Into<Arg>, db: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("MOVE")
        .param(params::key("key", key)?)
        .param(params::integer("db", db)?)
        .build())
}

/// OBJECT subcommand key
pub fn object(subcommand: impl Into<Arg>, key: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("OBJECT")
        .param(params::one_of("subcommand", ObjectSubcommand::ALL, subcommand)?)
        .param(params::key("key", key)?)
        .build())
}

/// PERSIST key
pub fn persist(key: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("PERSIST")
        .param(params::key("key", key)?)
        .build())
}

/// PEXPIRE key milliseconds
pub fn pexpire(key: impl Into<Arg>, milliseconds: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("PEXPIRE")
        .param(params::key("key", key)?)
        .param(params::integer("milliseconds", milliseconds)?)
        .build())
}

/// PEXPIREAT key unix-time-milliseconds
pub fn pexpireat(key: impl Into<Arg>, timestamp: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("PEXPIREAT")
        .param(params::key("key", key)?)
        .param(params::integer("timestamp", timestamp)?)
        .build())
}

/// PTTL key
pub fn pttl(key: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("PTTL")
        .param(params::key("key", key)?)
        .build())
}

/// RANDOMKEY
pub fn randomkey() -> Command {
    CommandBuilder::new("RANDOMKEY").build()
}

/// RENAME key newkey
pub fn rename(key: impl Into<Arg>, new_key: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("RENAME")
        .param(params::key("key", key)?)
        .param(params::key("newkey", new_key)?)
        .build())
}

/// RENAMENX key newkey
pub fn renamenx(key: impl Into<Arg>, new_key: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("RENAMENX")
        .param(params::key("key", key)?)
        .param(params::key("newkey", new_key)?)
        .build())
}

/// RESTORE key ttl serialized-value [REPLACE]
///
/// `serialized` is the opaque DUMP payload and is sent byte for byte.
pub fn restore(
    key: impl Into<Arg>,
    ttl: impl Into<Arg>,
    serialized: impl Into<Bytes>,
    options: RestoreOptions,
) -> Result<Command> {
    Ok(CommandBuilder::new("RESTORE")
        .param(params::key("key", key)?)
        .param(params::integer("ttl", ttl)?)
        .param(Parameter::raw(serialized))
        .flag_if(options.replace, "REPLACE")
        .build())
}

/// SCAN cursor [MATCH pattern] [COUNT count]
pub fn scan(cursor: impl Into<Arg>, options: &ScanOptions) -> Result<Command> {
    let pattern = options
        .pattern
        .clone()
        .map(|p| params::plain("pattern", p))
        .transpose()?;
    let count = options
        .count
        .clone()
        .map(|c| params::integer("count", c))
        .transpose()?;

    Ok(CommandBuilder::new("SCAN")
        .param(params::integer("cursor", cursor)?)
        .option("MATCH", pattern)
        .option("COUNT", count)
        .build())
}

/// SORT key [BY pattern] [LIMIT offset count] [GET pattern ...] [ASC|DESC] [ALPHA] [STORE destination]
pub fn sort(key: impl Into<Arg>, options: &SortOptions) -> Result<Command> {
    let by = options
        .by
        .clone()
        .map(|p| params::plain("by", p))
        .transpose()?;
    let limit = options
        .limit
        .clone()
        .map(|l| params::limit("limit", l))
        .transpose()?;
    let get = options
        .get
        .iter()
        .cloned()
        .map(|p| params::plain("get", p))
        .collect::<Result<Vec<_>>>()?;
    let store = options
        .store
        .clone()
        .map(|d| params::key("store", d))
        .transpose()?;

    let mut builder = CommandBuilder::new("SORT")
        .param(params::key("key", key)?)
        .option("BY", by)
        .option("LIMIT", limit)
        .repeated("GET", get);
    if let Some(order) = options.order {
        builder = builder.flag(order.as_str());
    }
    Ok(builder
        .flag_if(options.alpha, "ALPHA")
        .option("STORE", store)
        .build())
}

/// TTL key
pub fn ttl(key: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("TTL")
        .param(params::key("key", key)?)
        .build())
}

/// TYPE key
pub fn key_type(key: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("TYPE")
        .param(params::key("key", key)?)
        .build())
}

/// WAIT numreplicas timeout
///
/// `timeout` is milliseconds and is only forwarded to the server.
pub fn wait(replicas: impl Into<Arg>, timeout: impl Into<Arg>) -> Result<Command> {
    Ok(CommandBuilder::new("WAIT")
        .param(params::integer("numreplicas", replicas)?)
        .param(params::integer("timeout", timeout)?)
        .build())
}
