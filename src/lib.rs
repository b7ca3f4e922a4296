//! # influxdb-transport
//!
//! HTTP transport for InfluxDB with support for both API generations.
//!
//! - v1 endpoints are addressed by database and optional retention policy
//!   (`?db=mydb&rp=autogen`).
//! - v2 endpoints are addressed by organization and bucket
//!   (`?org=acme&bucket=metrics`).
//!
//! The connection URL is validated against the endpoint version when the
//! transport is created. Responses are returned as raw bodies; failures are
//! reported through [`TransportError`].
//!
//! ## Example
//!
//! ```no_run
//! # use influxdb_transport::*;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = factory::get_transport(
//!     "http://localhost:8086/?db=mydb&rp=autogen",
//!     EndpointVersion::V1,
//! )?;
//!
//! transport.create_database().await?;
//! transport.send("cpu,host=server01 value=0.64".to_string()).await?;
//!
//! let body = transport.query("SELECT * FROM cpu").await?;
//! println!("{}", body);
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod connection;
pub mod error;
pub mod factory;
pub mod transport;

// Re-export public API
pub use connection::{EndpointVersion, HttpConfig, ProxyConfig, TransportOptions};
pub use error::{ConfigurationError, ErrorKind, FactoryError, InfluxDbError, TransportError};
pub use factory::{get_transport, get_with_options, get_with_proxy};
pub use transport::{HttpTransport, Transport};
