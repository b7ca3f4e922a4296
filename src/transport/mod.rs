//! Transport layer for InfluxDB communication.
//!
//! This module provides the transport abstraction and its HTTP implementation.
//!
//! # Architecture
//!
//! The transport layer is organized into:
//! - `protocol` - Transport trait definition
//! - `params` - Version-specific query parameters
//! - `messages` - Request and response values
//! - `session` - HTTP session abstraction and reqwest implementation
//! - `response` - Mapping of responses to errors
//! - `http` - HTTP transport implementation
//!
//! # Example
//!
//! ```no_run
//! use influxdb_transport::connection::EndpointVersion;
//! use influxdb_transport::transport::{HttpTransport, Transport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut transport = HttpTransport::new(
//!     "http://localhost:8086/?org=acme&bucket=metrics",
//!     EndpointVersion::V2,
//! )?;
//! transport.set_api_token("my-token")?;
//!
//! transport.send("cpu,host=a value=1".to_string()).await?;
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod messages;
pub mod params;
pub mod protocol;
pub mod response;
pub mod session;

// Re-export commonly used types
pub use http::HttpTransport;
pub use messages::{HttpRequest, HttpResponse, Method, TransportFailure};
pub use params::{build_parameters, QueryParameters};
pub use protocol::Transport;
pub use response::check_response;
pub use session::{HttpSession, ReqwestSession};
