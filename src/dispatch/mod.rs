//! Command Dispatch
//!
//! A [`Dispatcher`] sends one assembled [`Command`] and hands back the
//! server's reply. It is the only part of the client that does I/O.
//!
//! ```text
//!   Idle ──execute()──> Sent ──> AwaitingReply ──┬──> Ok(RespValue)  ──> Idle
//!                                                └──> Err(ClientError) ──> Idle
//! ```
//!
//! `execute` takes `&mut self`, so a dispatcher has at most one request in
//! flight. Callers that want concurrency open more dispatchers. A request
//! that is dropped or fails before its reply is read leaves no state for
//! the next call to trip over: [`TcpDispatcher`] refuses further commands
//! with [`ClientError::Poisoned`] instead of handing out a stale reply.
//!
//! ## Implementations
//!
//! - [`TcpDispatcher`]: one TCP connection to a RESP server
//! - [`ScriptedDispatcher`]: canned replies, records what was sent

pub mod connection;
pub mod scripted;

pub use connection::{DispatchStats, TcpDispatcher};
pub use scripted::ScriptedDispatcher;

use crate::command::Command;
use crate::error::ClientError;
use crate::protocol::RespValue;
use std::future::Future;

/// Sends a command and waits for its reply.
///
/// Error replies (`-ERR ...`) are returned as `Ok(RespValue::Error(..))`;
/// `Err` is reserved for transport failures.
pub trait Dispatcher {
    fn execute(
        &mut self,
        command: &Command,
    ) -> impl Future<Output = Result<RespValue, ClientError>> + Send;
}
