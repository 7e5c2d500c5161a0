//! TCP Dispatcher
//!
//! Sends commands to a RESP server over a single TCP connection and reads
//! back one reply per command.
//!
//! ## Request Lifecycle
//!
//! ```text
//! 1. Encode command (multi-bulk)
//!        │
//!        ▼
//! 2. Write + flush
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │  Read Loop                   │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Try to parse a reply    │─┼──> complete: return it
//!    │  └───────────┬─────────────┘ │
//!    │              │ incomplete    │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Read bytes from socket  │ │
//!    │  └───────────┬─────────────┘ │
//!    │              │               │
//!    │         [Loop back]          │
//!    └──────────────────────────────┘
//! ```
//!
//! ## Buffer Management
//!
//! Replies accumulate in a `BytesMut`. TCP may deliver a reply in pieces,
//! so parsing is retried after every read until the reply is complete or
//! the buffer reaches `max_reply_size`.
//!
//! ## Poisoning
//!
//! A request counts as in flight from the moment its bytes start going out
//! until its reply is fully decoded. If `execute` is dropped mid-way (e.g.
//! under `tokio::time::timeout`) or fails, the stream position no longer
//! lines up with request boundaries. The dispatcher then refuses every
//! later call with [`ClientError::Poisoned`] without touching the socket.

use crate::command::Command;
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::ClientError;
use crate::protocol::{ReplyParser, RespValue};
use bytes::BytesMut;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tracing::{debug, info, trace, warn};

/// Initial read buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Counters for one dispatcher
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStats {
    /// Commands written to the socket
    pub commands_sent: u64,
    /// Replies fully decoded
    pub replies_received: u64,
    pub bytes_written: u64,
    pub bytes_read: u64,
}

/// A dispatcher bound to one TCP connection.
pub struct TcpDispatcher {
    /// The TCP stream to the server
    stream: BufWriter<TcpStream>,

    /// Server address (for logging)
    addr: SocketAddr,

    /// Buffer for incoming reply bytes
    buffer: BytesMut,

    parser: ReplyParser,

    max_reply_size: usize,

    stats: DispatchStats,

    /// Set while a reply is owed to a request that never finished
    poisoned: bool,
}

impl TcpDispatcher {
    /// Opens a connection to the server named by `config`.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(config.address()).await?;
        stream.set_nodelay(config.nodelay)?;
        let addr = stream.peer_addr()?;
        info!(server = %addr, "Connected");
        Ok(Self::from_stream(stream, addr, config.max_reply_size))
    }

    fn from_stream(stream: TcpStream, addr: SocketAddr, max_reply_size: usize) -> Self {
        Self {
            stream: BufWriter::new(stream),
            addr,
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            parser: ReplyParser::new(),
            max_reply_size,
            stats: DispatchStats::default(),
            poisoned: false,
        }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// True once an interrupted or failed request has left the connection
    /// out of step with the server. Open a new dispatcher to recover.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    async fn send_command(&mut self, command: &Command) -> Result<(), ClientError> {
        let frame = command.encode();
        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;
        self.stats.commands_sent += 1;
        self.stats.bytes_written += frame.len() as u64;
        trace!(server = %self.addr, verb = command.verb(), bytes = frame.len(), "Sent command");
        Ok(())
    }

    async fn read_reply(&mut self) -> Result<RespValue, ClientError> {
        loop {
            if let Some(reply) = self.try_parse_reply()? {
                self.stats.replies_received += 1;
                return Ok(reply);
            }
            self.read_more_data().await?;
        }
    }

    fn try_parse_reply(&mut self) -> Result<Option<RespValue>, ClientError> {
        if self.buffer.is_empty() {
            return Ok(None);
        }

        match self.parser.parse(&self.buffer) {
            Ok(Some((reply, consumed))) => {
                let _ = self.buffer.split_to(consumed);
                trace!(
                    server = %self.addr,
                    consumed = consumed,
                    remaining = self.buffer.len(),
                    "Parsed reply"
                );
                Ok(Some(reply))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!(server = %self.addr, error = %e, "Malformed reply");
                // The stream position is unknown after a framing error
                self.buffer.clear();
                Err(ClientError::Parse(e))
            }
        }
    }

    async fn read_more_data(&mut self) -> Result<(), ClientError> {
        if self.buffer.len() >= self.max_reply_size {
            warn!(
                server = %self.addr,
                size = self.buffer.len(),
                "Reply size limit exceeded"
            );
            return Err(ClientError::ReplyTooLarge {
                max: self.max_reply_size,
            });
        }

        if self.buffer.capacity() - self.buffer.len() < 1024 {
            self.buffer.reserve(INITIAL_BUFFER_SIZE);
        }

        let n = self.stream.get_mut().read_buf(&mut self.buffer).await?;
        if n == 0 {
            debug!(server = %self.addr, buffered = self.buffer.len(), "Connection closed by server");
            return Err(ClientError::ConnectionClosed);
        }

        self.stats.bytes_read += n as u64;
        trace!(server = %self.addr, bytes = n, "Read data");
        Ok(())
    }
}

impl Dispatcher for TcpDispatcher {
    async fn execute(&mut self, command: &Command) -> Result<RespValue, ClientError> {
        if self.poisoned {
            debug!(server = %self.addr, verb = command.verb(), "Refusing command on poisoned connection");
            return Err(ClientError::Poisoned);
        }

        // Cleared only once the whole reply is in hand
        self.poisoned = true;
        self.send_command(command).await?;
        let reply = self.read_reply().await?;
        self.poisoned = false;
        Ok(reply)
    }
}
