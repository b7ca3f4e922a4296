//! Client configuration: timeouts and the optional settings layered onto a
//! transport by the factory.

use crate::connection::params::EndpointVersion;
use crate::connection::proxy::ProxyConfig;
use crate::error::ConfigurationError;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Default connect and request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeouts applied to every request of a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    /// Time allowed to establish the TCP/TLS connection
    pub connect_timeout: Duration,

    /// Time allowed for the whole request, including the body
    pub request_timeout: Duration,
}

impl HttpConfig {
    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the overall request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Reject timeouts that would fail every request.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.connect_timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout {
                name: "connect_timeout",
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout {
                name: "request_timeout",
            });
        }
        Ok(())
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Optional settings for [`crate::factory::get_with_options`].
///
/// Every field may be omitted; the endpoint version then defaults to v1.
///
/// ```
/// # use influxdb_transport::connection::TransportOptions;
/// # use influxdb_transport::connection::EndpointVersion;
/// let options = TransportOptions::default()
///     .endpoint_version(EndpointVersion::V2)
///     .api_token("my-token");
/// assert_eq!(options.endpoint_version, Some(EndpointVersion::V2));
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransportOptions {
    pub endpoint_version: Option<EndpointVersion>,
    pub proxy: Option<ProxyConfig>,
    pub api_token: Option<String>,
}

impl TransportOptions {
    pub fn endpoint_version(mut self, version: EndpointVersion) -> Self {
        self.endpoint_version = Some(version);
        self
    }

    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

// Keep the token out of debug output
impl fmt::Debug for TransportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportOptions")
            .field("endpoint_version", &self.endpoint_version)
            .field("proxy", &self.proxy)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
