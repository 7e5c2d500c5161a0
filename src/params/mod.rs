//! Parameter Validation
//!
//! Every argument of every command goes through one of a small, closed set
//! of rules before it becomes a wire token. Command builders never format
//! arguments themselves, so the same argument shape fails the same way
//! everywhere.
//!
//! ```text
//!   caller value ──> Arg ──> ParamKind::validate ──> Parameter (1..N tokens)
//!                                   │
//!                                   └──> ValidationError (nothing sent)
//! ```
//!
//! ## Example
//!
//! ```
//! use flashkv_client::params;
//!
//! let keys = params::key_list("keys", vec!["a", "b"]).unwrap();
//! assert_eq!(keys.len(), 2);
//!
//! assert!(params::integer("seconds", "12a").is_err());
//! assert!(params::port("port", 0).is_err());
//! ```

pub mod arg;
pub mod kind;

pub use arg::Arg;
pub use kind::{
    integer, key, key_list, limit, one_of, plain, port, port_number, ParamKind, Parameter,
};
