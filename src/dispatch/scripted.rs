//! Scripted dispatcher
//!
//! Replays a queue of canned replies and records every command it was
//! asked to send. Used to exercise commands end to end without a server.

use crate::command::Command;
use crate::dispatch::Dispatcher;
use crate::error::ClientError;
use crate::protocol::RespValue;
use std::collections::VecDeque;
use tracing::trace;

/// A dispatcher that answers from a script.
///
/// # Example
///
/// ```
/// use flashkv_client::{Client, RespValue, ScriptedDispatcher};
///
/// let dispatcher = ScriptedDispatcher::new([RespValue::integer(1)]);
/// let mut client = Client::new(dispatcher);
///
/// let set = tokio_test::block_on(client.expire("session:42", 30)).unwrap();
/// assert!(set);
/// assert_eq!(client.dispatcher().sent()[0].to_string(), "EXPIRE session:42 30");
/// ```
#[derive(Debug, Default)]
pub struct ScriptedDispatcher {
    replies: VecDeque<RespValue>,
    sent: Vec<Command>,
}

impl ScriptedDispatcher {
    pub fn new(replies: impl IntoIterator<Item = RespValue>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            sent: Vec::new(),
        }
    }

    /// Queues another reply.
    pub fn push_reply(&mut self, reply: RespValue) {
        self.replies.push_back(reply);
    }

    /// Every command sent so far, oldest first.
    pub fn sent(&self) -> &[Command] {
        &self.sent
    }

    pub fn last_sent(&self) -> Option<&Command> {
        self.sent.last()
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Dispatcher for ScriptedDispatcher {
    async fn execute(&mut self, command: &Command) -> Result<RespValue, ClientError> {
        self.sent.push(command.clone());
        let reply = self.replies.pop_front().ok_or(ClientError::ConnectionClosed)?;
        trace!(verb = command.verb(), reply = reply.type_name(), "scripted reply");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let mut dispatcher =
            ScriptedDispatcher::new([RespValue::integer(1), RespValue::ok()]);

        let ttl = commands::ttl("a").unwrap();
        let rename = commands::rename("a", "b").unwrap();

        assert_eq!(dispatcher.execute(&ttl).await.unwrap(), RespValue::integer(1));
        assert_eq!(dispatcher.execute(&rename).await.unwrap(), RespValue::ok());
        assert_eq!(dispatcher.sent(), &[ttl, rename.clone()]);
        assert_eq!(dispatcher.last_sent(), Some(&rename));
        assert_eq!(dispatcher.remaining(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_script_is_transport_error() {
        let mut dispatcher = ScriptedDispatcher::default();
        let err = dispatcher.execute(&commands::randomkey()).await.unwrap_err();
        assert!(matches!(err, ClientError::ConnectionClosed));
        assert_eq!(dispatcher.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_push_reply() {
        let mut dispatcher = ScriptedDispatcher::default();
        dispatcher.push_reply(RespValue::Null);
        assert_eq!(
            dispatcher.execute(&commands::randomkey()).await.unwrap(),
            RespValue::Null
        );
    }
}
