//! Typed Client
//!
//! [`Client`] is the public command surface. Every method follows the same
//! three steps:
//!
//! ```text
//!   builder (commands::*)  ──>  Dispatcher::execute  ──>  reply rule (reply::*)
//!   validate + assemble          one request/reply          narrow to return type
//! ```
//!
//! A validation failure returns before anything is sent. An error reply
//! from the server becomes [`ClientError::Server`] in [`Client::call`], so
//! the reply rules only ever see success shapes.

use crate::command::Command;
use crate::commands::{
    self, MigrateOptions, ObjectSubcommand, RestoreOptions, ScanOptions, SortOptions,
};
use crate::config::ClientConfig;
use crate::dispatch::{Dispatcher, TcpDispatcher};
use crate::error::{ClientError, Result, ServerError};
use crate::params::Arg;
use crate::protocol::RespValue;
use crate::reply::{self, ObjectInfo, ScanPage, SortResult};
use bytes::Bytes;
use tracing::debug;

/// Keyspace client over any [`Dispatcher`].
#[derive(Debug)]
pub struct Client<D> {
    dispatcher: D,
}

impl Client<TcpDispatcher> {
    /// Connects to the server named by `config`.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(TcpDispatcher::connect(config).await?))
    }
}

impl<D: Dispatcher> Client<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    pub fn into_inner(self) -> D {
        self.dispatcher
    }

    /// Sends an assembled command and returns the raw reply.
    ///
    /// Error replies are converted to [`ClientError::Server`].
    pub async fn call(&mut self, command: Command) -> Result<RespValue> {
        debug!(verb = command.verb(), args = command.args().len(), "Dispatching command");

        match self.dispatcher.execute(&command).await? {
            RespValue::Error(line) => {
                let err = ServerError::from_line(&line);
                debug!(verb = command.verb(), code = err.code(), "Server error");
                Err(ClientError::Server(err))
            }
            reply => Ok(reply),
        }
    }

    /// Removes the keys, returning how many existed.
    pub async fn del(&mut self, keys: impl Into<Arg>) -> Result<i64> {
        let reply = self.call(commands::del(keys)?).await?;
        reply::integer("DEL", reply)
    }

    /// Serialized value of `key`, or `None` if it does not exist.
    pub async fn dump(&mut self, key: impl Into<Arg>) -> Result<Option<Bytes>> {
        let reply = self.call(commands::dump(key)?).await?;
        reply::nullable_bytes("DUMP", reply)
    }

    /// Number of the given keys that exist. Repeated keys count repeatedly.
    pub async fn exists(&mut self, keys: impl Into<Arg>) -> Result<i64> {
        let reply = self.call(commands::exists(keys)?).await?;
        reply::integer("EXISTS", reply)
    }

    /// `true` if the timeout was set.
    pub async fn expire(&mut self, key: impl Into<Arg>, seconds: impl Into<Arg>) -> Result<bool> {
        let reply = self.call(commands::expire(key, seconds)?).await?;
        reply::boolean("EXPIRE", reply)
    }

    pub async fn expireat(
        &mut self,
        key: impl Into<Arg>,
        timestamp: impl Into<Arg>,
    ) -> Result<bool> {
        let reply = self.call(commands::expireat(key, timestamp)?).await?;
        reply::boolean("EXPIREAT", reply)
    }

    pub async fn keys(&mut self, pattern: impl Into<Arg>) -> Result<Vec<String>> {
        let reply = self.call(commands::keys(pattern)?).await?;
        reply::string_list("KEYS", reply)
    }

    /// Transfers `key` to another instance.
    ///
    /// Returns `false` when the server reports `NOKEY`.
    pub async fn migrate(
        &mut self,
        host: impl Into<Arg>,
        port: impl Into<Arg>,
        key: impl Into<Arg>,
        destination_db: impl Into<Arg>,
        timeout: impl Into<Arg>,
        options: MigrateOptions,
    ) -> Result<bool> {
        let command = commands::migrate(host, port, key, destination_db, timeout, options)?;
        let reply = self.call(command).await?;
        reply::migrate_status("MIGRATE", reply)
    }

    /// `MOVE`; `false` if the key was missing or already present in `db`.
    pub async fn move_key(&mut self, key: impl Into<Arg>, db: impl Into<Arg>) -> Result<bool> {
        let reply = self.call(commands::move_key(key, db)?).await?;
        reply::boolean("MOVE", reply)
    }

    pub async fn object(
        &mut self,
        subcommand: impl Into<Arg>,
        key: impl Into<Arg>,
    ) -> Result<ObjectInfo> {
        let subcommand = ObjectSubcommand::parse(subcommand)?;
        let reply = self.call(commands::object(subcommand, key)?).await?;
        reply::object_info("OBJECT", subcommand, reply)
    }

    /// `true` if a timeout was removed.
    pub async fn persist(&mut self, key: impl Into<Arg>) -> Result<bool> {
        let reply = self.call(commands::persist(key)?).await?;
        reply::boolean("PERSIST", reply)
    }

    pub async fn pexpire(
        &mut self,
        key: impl Into<Arg>,
        milliseconds: impl Into<Arg>,
    ) -> Result<bool> {
        let reply = self.call(commands::pexpire(key, milliseconds)?).await?;
        reply::boolean("PEXPIRE", reply)
    }

    pub async fn pexpireat(
        &mut self,
        key: impl Into<Arg>,
        timestamp: impl Into<Arg>,
    ) -> Result<bool> {
        let reply = self.call(commands::pexpireat(key, timestamp)?).await?;
        reply::boolean("PEXPIREAT", reply)
    }

    /// Remaining time to live in milliseconds; `-2` missing, `-1` no expiry.
    pub async fn pttl(&mut self, key: impl Into<Arg>) -> Result<i64> {
        let reply = self.call(commands::pttl(key)?).await?;
        reply::integer("PTTL", reply)
    }

    /// A random key, or `None` when the keyspace is empty.
    pub async fn randomkey(&mut self) -> Result<Option<String>> {
        let reply = self.call(commands::randomkey()).await?;
        reply::nullable_string("RANDOMKEY", reply)
    }

    pub async fn rename(&mut self, key: impl Into<Arg>, new_key: impl Into<Arg>) -> Result<bool> {
        let reply = self.call(commands::rename(key, new_key)?).await?;
        reply::ok("RENAME", reply)
    }

    /// `false` if `new_key` already exists.
    pub async fn renamenx(
        &mut self,
        key: impl Into<Arg>,
        new_key: impl Into<Arg>,
    ) -> Result<bool> {
        let reply = self.call(commands::renamenx(key, new_key)?).await?;
        reply::boolean("RENAMENX", reply)
    }

    /// Recreates a key from a `DUMP` payload. `ttl` is milliseconds, `0` for none.
    pub async fn restore(
        &mut self,
        key: impl Into<Arg>,
        ttl: impl Into<Arg>,
        serialized: impl Into<Bytes>,
        options: RestoreOptions,
    ) -> Result<bool> {
        let reply = self
            .call(commands::restore(key, ttl, serialized, options)?)
            .await?;
        reply::ok("RESTORE", reply)
    }

    /// One step of a cursor iteration. Start with cursor `0`; stop when the
    /// returned page [`is_last`](ScanPage::is_last).
    pub async fn scan(&mut self, cursor: impl Into<Arg>, options: &ScanOptions) -> Result<ScanPage> {
        let reply = self.call(commands::scan(cursor, options)?).await?;
        reply::scan_page("SCAN", reply)
    }

    pub async fn sort(&mut self, key: impl Into<Arg>, options: &SortOptions) -> Result<SortResult> {
        let reply = self.call(commands::sort(key, options)?).await?;
        reply::sort_result("SORT", reply)
    }

    /// Remaining time to live in seconds; `-2` missing, `-1` no expiry.
    pub async fn ttl(&mut self, key: impl Into<Arg>) -> Result<i64> {
        let reply = self.call(commands::ttl(key)?).await?;
        reply::integer("TTL", reply)
    }

    /// `TYPE`, e.g. `string`, `list` or `none`.
    pub async fn key_type(&mut self, key: impl Into<Arg>) -> Result<String> {
        let reply = self.call(commands::key_type(key)?).await?;
        reply::status("TYPE", reply)
    }

    /// Number of replicas that acknowledged the preceding writes.
    pub async fn wait(&mut self, replicas: impl Into<Arg>, timeout: impl Into<Arg>) -> Result<i64> {
        let reply = self.call(commands::wait(replicas, timeout)?).await?;
        reply::integer("WAIT", reply)
    }
}
