//! Configuration for the FlashKV client
//!
//! Connection settings with sensible defaults, built through
//! [`ClientConfig::builder`].

use crate::error::ValidationError;
use crate::params;
use crate::{DEFAULT_HOST, DEFAULT_PORT};

/// Default cap on a single buffered reply (64 MB)
pub const DEFAULT_MAX_REPLY_SIZE: usize = 64 * 1024 * 1024;

/// Settings for a [`TcpDispatcher`](crate::dispatch::TcpDispatcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server host name or address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    /// Largest reply the dispatcher will buffer before giving up (bytes)
    pub max_reply_size: usize,

    /// Disable Nagle's algorithm on the socket
    pub nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_reply_size: DEFAULT_MAX_REPLY_SIZE,
            nodelay: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// `host:port`, as passed to `TcpStream::connect`. IPv6 literals are
    /// bracketed (`[::1]:6379`).
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
    port: Option<params::Arg>,
}

impl ClientConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port. Checked in [`build`](Self::build).
    pub fn port(mut self, port: impl Into<params::Arg>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn max_reply_size(mut self, bytes: usize) -> Self {
        self.config.max_reply_size = bytes;
        self
    }

    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Finishes the config, rejecting a port outside 1..=65535.
    pub fn build(self) -> Result<ClientConfig, ValidationError> {
        let mut config = self.config;
        if let Some(port) = self.port {
            config.port = params::port_number("port", port)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.address(), "127.0.0.1:6379");
        assert_eq!(config.max_reply_size, DEFAULT_MAX_REPLY_SIZE);
        assert!(config.nodelay);
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .host("cache.internal")
            .port("6380")
            .max_reply_size(1024)
            .nodelay(false)
            .build()
            .unwrap();
        assert_eq!(config.address(), "cache.internal:6380");
        assert_eq!(config.max_reply_size, 1024);
        assert!(!config.nodelay);
    }

    #[test]
    fn test_ipv6_address_is_bracketed() {
        let config = ClientConfig::builder().host("::1").port(6380).build().unwrap();
        assert_eq!(config.address(), "[::1]:6380");
        assert!(config.address().parse::<std::net::SocketAddr>().is_ok());

        let config = ClientConfig::builder().host("[fe80::1]").build().unwrap();
        assert_eq!(config.address(), "[fe80::1]:6379");
    }

    #[test]
    fn test_builder_rejects_bad_port() {
        assert!(matches!(
            ClientConfig::builder().port(0).build(),
            Err(ValidationError::PortOutOfRange { .. })
        ));
        assert!(ClientConfig::builder().port(70000).build().is_err());
        assert!(ClientConfig::builder().port("http").build().is_err());
    }
}
