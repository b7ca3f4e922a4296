//! Connection settings for InfluxDB endpoints.
//!
//! This module provides connection URL parsing, version-specific addressing
//! validation, authentication, proxy and timeout configuration.
//!
//! # Example
//!
//! ```
//! # use influxdb_transport::connection::{Addressing, ConnectionDescriptor, EndpointVersion};
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let descriptor = ConnectionDescriptor::parse("http://localhost:8086/?org=acme&bucket=metrics");
//! let addressing = Addressing::resolve(&descriptor, EndpointVersion::V2)?;
//!
//! assert_eq!(addressing.version(), EndpointVersion::V2);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod options;
pub mod params;
pub mod proxy;

pub use auth::{ApiToken, Authentication, Credentials};
pub use options::{HttpConfig, TransportOptions};
pub use params::{
    parse_parameter, parse_url, split_user_info, Addressing, ConnectionDescriptor, EndpointVersion,
};
pub use proxy::{ProxyAuthentication, ProxyConfig};
