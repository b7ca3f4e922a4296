//! Error types for influxdb-transport.
//!
//! This module defines domain-specific error types organized by functional area.

use std::fmt;
use thiserror::Error;

use crate::connection::EndpointVersion;

/// Top-level error type encompassing all possible errors.
#[derive(Error, Debug)]
pub enum InfluxDbError {
    /// Connection descriptor or client configuration errors
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Backend selection errors
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// Request dispatch errors
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors detected while building a transport, never at request time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A parameter required by the endpoint version is absent
    #[error("Parameter '{parameter}' is required in URL for endpoint {version}")]
    MissingParameter {
        parameter: &'static str,
        version: EndpointVersion,
    },

    /// A required parameter was given without a value
    #[error("Parameter '{parameter}' must not be empty for endpoint {version}")]
    EmptyParameter {
        parameter: &'static str,
        version: EndpointVersion,
    },

    /// A parameter that belongs to the other endpoint version was supplied
    #[error("Parameter '{parameter}' provided in URL but not supported for endpoint {version}")]
    UnsupportedParameter {
        parameter: &'static str,
        version: EndpointVersion,
    },

    /// Basic authentication and an API token were both configured
    #[error("Basic authentication and API token are mutually exclusive")]
    ConflictingAuthentication,

    /// Proxy URL or proxy credentials rejected by the HTTP client
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// A timeout that would make every request fail immediately
    #[error("Invalid {name}: must be greater than zero")]
    InvalidTimeout { name: &'static str },

    /// The API token cannot be sent as an HTTP header value
    #[error("Invalid API token: not a valid header value")]
    InvalidApiToken,

    /// The underlying HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Errors raised while selecting a backend from a URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// The URL carries no scheme
    #[error("Ill-formed URI: {0}")]
    MalformedUri(String),

    /// No transport is registered for the scheme
    #[error("Unrecognized backend {scheme}")]
    UnrecognizedBackend { scheme: String },
}

/// Errors raised by a transport operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Network level failure (resolution, connect, TLS, timeout).
    ///
    /// `message` may be empty.
    #[error("Request error: ({code}) {message}")]
    Request { code: i32, message: String },

    /// The server answered with a non-success status
    #[error("Request failed: ({status}) {reason}")]
    RequestFailed { status: u16, reason: String },

    /// The operation does not exist for the endpoint version
    #[error("{operation} is not supported for endpoint {version}")]
    UnsupportedOperation {
        operation: &'static str,
        version: EndpointVersion,
    },
}

/// Coarse error classification for callers that only need to branch on category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid descriptor or client settings
    Configuration = 1,
    /// URL scheme could not be mapped to a backend
    Factory = 2,
    /// No HTTP response was received
    Network = 3,
    /// HTTP response with a non-success status
    Server = 4,
    /// Operation not available for the endpoint version
    Unsupported = 5,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "CONFIGURATION"),
            ErrorKind::Factory => write!(f, "FACTORY"),
            ErrorKind::Network => write!(f, "NETWORK"),
            ErrorKind::Server => write!(f, "SERVER"),
            ErrorKind::Unsupported => write!(f, "UNSUPPORTED"),
        }
    }
}

impl InfluxDbError {
    /// Map to error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            InfluxDbError::Configuration(_) => ErrorKind::Configuration,
            InfluxDbError::Factory(_) => ErrorKind::Factory,
            InfluxDbError::Transport(e) => e.kind(),
        }
    }
}

impl TransportError {
    /// Map to error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Request { .. } => ErrorKind::Network,
            TransportError::RequestFailed { .. } => ErrorKind::Server,
            TransportError::UnsupportedOperation { .. } => ErrorKind::Unsupported,
        }
    }
}
