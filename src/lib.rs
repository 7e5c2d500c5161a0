//! # FlashKV Client - Typed Keyspace Commands over RESP
//!
//! A client-side command layer for Redis-compatible servers. Each keyspace
//! command is a typed method that validates its arguments, assembles a
//! protocol-correct request, sends it and decodes the reply into a native
//! value.
//!
//! ## Features
//!
//! - **Validated Arguments**: empty keys, bad integers, out-of-range ports and
//!   unknown subcommands are rejected before any I/O
//! - **Deterministic Assembly**: optional clauses are always emitted in
//!   protocol order (`MIGRATE ... COPY REPLACE`, `SORT ... GET a GET b`)
//! - **Binary Safe**: every token is length-prefixed; `DUMP` payloads pass
//!   through untouched
//! - **Async I/O**: built on Tokio; one request in flight per dispatcher
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            FlashKV Client                               │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │   Client    │───>│  commands   │───>│   params    │                  │
//! │  │  (typed     │    │  (builder   │    │ (validate   │                  │
//! │  │   methods)  │    │   per verb) │    │  per kind)  │                  │
//! │  └──────┬──────┘    └──────┬──────┘    └─────────────┘                  │
//! │         │                  │                                            │
//! │         │                  ▼                                            │
//! │         │           ┌─────────────┐                                     │
//! │         │           │  Command    │  verb + ordered tokens              │
//! │         │           │  Builder    │                                     │
//! │         │           └──────┬──────┘                                     │
//! │         ▼                  ▼                                            │
//! │  ┌──────────────────────────────────────┐    ┌─────────────┐            │
//! │  │            Dispatcher                │───>│   reply     │            │
//! │  │  TcpDispatcher | ScriptedDispatcher  │    │  (decode    │            │
//! │  │  encode ─> socket ─> ReplyParser     │    │   rules)    │            │
//! │  └──────────────────────────────────────┘    └─────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use flashkv_client::{Client, ClientConfig};
//! use flashkv_client::commands::ScanOptions;
//!
//! #[tokio::main]
//! async fn main() -> flashkv_client::Result<()> {
//!     let config = ClientConfig::builder().port(6379).build()?;
//!     let mut client = Client::connect(&config).await?;
//!
//!     client.expire("session:42", 30).await?;
//!
//!     let mut cursor = 0;
//!     loop {
//!         let page = client.scan(cursor, &ScanOptions::new().pattern("user:*")).await?;
//!         println!("{:?}", page.keys);
//!         if page.is_last() {
//!             break;
//!         }
//!         cursor = page.cursor;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Supported Commands
//!
//! - `DEL key [key ...]` / `EXISTS key [key ...]`
//! - `DUMP key` / `RESTORE key ttl serialized-value [REPLACE]`
//! - `EXPIRE key seconds` / `PEXPIRE key milliseconds`
//! - `EXPIREAT key timestamp` / `PEXPIREAT key timestamp`
//! - `TTL key` / `PTTL key` / `PERSIST key`
//! - `KEYS pattern` / `RANDOMKEY` / `TYPE key`
//! - `MIGRATE host port key destination-db timeout [COPY] [REPLACE]`
//! - `MOVE key db`
//! - `OBJECT REFCOUNT|ENCODING|IDLETIME key`
//! - `RENAME key newkey` / `RENAMENX key newkey`
//! - `SCAN cursor [MATCH pattern] [COUNT count]`
//! - `SORT key [BY pattern] [LIMIT offset count] [GET pattern ...] [ASC|DESC] [ALPHA] [STORE destination]`
//! - `WAIT numreplicas timeout`
//!
//! ## Module Overview
//!
//! - [`params`]: argument values and per-kind validation
//! - [`command`]: the assembled request and its wire encoding
//! - [`commands`]: one builder per verb, plus option objects
//! - [`client`]: typed async methods
//! - [`dispatch`]: sending a command and reading its reply
//! - [`reply`]: narrowing replies to return types
//! - [`protocol`]: RESP values and the reply parser
//! - [`error`]: validation, server and transport errors
//! - [`config`]: connection settings

pub mod client;
pub mod command;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod params;
pub mod protocol;
pub mod reply;

// Re-export commonly used types for convenience
pub use client::Client;
pub use command::{Command, CommandBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use dispatch::{DispatchStats, Dispatcher, ScriptedDispatcher, TcpDispatcher};
pub use error::{ClientError, ErrorKind, Result, ServerError, ValidationError};
pub use params::{Arg, ParamKind, Parameter};
pub use protocol::{ParseError, ReplyParser, RespValue};
pub use reply::{ObjectInfo, ScanPage, SortResult};

/// The default server port (same as Redis)
pub const DEFAULT_PORT: u16 = 6379;

/// The default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of the FlashKV client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
