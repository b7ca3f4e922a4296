//! Transport trait.
//!
//! A transport issues query, write and administrative calls against one
//! InfluxDB endpoint over a specific protocol. Addressing is fixed at
//! construction; authentication and proxy may be configured once before the
//! first request.

use crate::connection::ProxyConfig;
use crate::error::{ConfigurationError, TransportError};
use async_trait::async_trait;

/// Capability consumed by higher-level clients (batching, line protocol
/// encoding).
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Run a read query and return the raw response body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails or the server answers
    /// with a non-success status.
    async fn query(&self, query: &str) -> Result<String, TransportError>;

    /// Write line protocol.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails or the server answers
    /// with a non-success status.
    async fn send(&self, line_protocol: String) -> Result<(), TransportError>;

    /// Run an administrative statement and return the raw response body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails or the server answers
    /// with a non-success status.
    async fn execute(&self, command: &str) -> Result<String, TransportError>;

    /// Create the database named in the connection URL.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::UnsupportedOperation` if the endpoint has no
    /// notion of databases.
    async fn create_database(&self) -> Result<(), TransportError>;

    /// Authenticate with HTTP Basic credentials.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ConflictingAuthentication` if an API token
    /// is already set.
    fn set_basic_authentication(&mut self, user: &str, password: &str) -> Result<(), ConfigurationError>;

    /// Authenticate with an API token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ConflictingAuthentication` if basic
    /// credentials are already set.
    fn set_api_token(&mut self, token: &str) -> Result<(), ConfigurationError>;

    /// Route requests through a proxy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the proxy cannot be applied.
    fn set_proxy(&mut self, proxy: &ProxyConfig) -> Result<(), ConfigurationError>;
}
