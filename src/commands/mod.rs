//! Keyspace Commands
//!
//! Pure builders for the generic key commands, one per verb, plus the
//! option objects for verbs with optional clauses.
//!
//! ```text
//!   commands::expire("session:42", 30)
//!          │
//!          ▼
//!   params::key / params::integer      (validate)
//!          │
//!          ▼
//!   CommandBuilder ... build()         (assemble)
//!          │
//!          ▼
//!   Command { EXPIRE, [session:42, 30] }
//! ```
//!
//! ## Supported Commands
//!
//! - `DEL`, `EXISTS`, `KEYS`, `SCAN`, `RANDOMKEY`
//! - `EXPIRE`, `EXPIREAT`, `PEXPIRE`, `PEXPIREAT`, `PERSIST`, `TTL`, `PTTL`
//! - `RENAME`, `RENAMENX`, `MOVE`, `MIGRATE`
//! - `DUMP`, `RESTORE`
//! - `OBJECT`, `TYPE`, `SORT`, `WAIT`

pub mod keys;
pub mod options;

pub use keys::*;
pub use options::{
    MigrateOptions, ObjectSubcommand, RestoreOptions, ScanOptions, SortOptions, SortOrder,
};
