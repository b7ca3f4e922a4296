//! Connection descriptor parsing and validation.
//!
//! A connection URL is split into the base endpoint, optional user-info
//! credentials and the addressing parameters (`db`, `rp`, `bucket`, `org`).
//! Parsing never fails; whether the parameters fit the selected endpoint
//! version is checked when the descriptor is resolved into an [`Addressing`].

use super::auth::Credentials;
use crate::error::ConfigurationError;
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

const DATABASE_PARAM: &str = "db";
const RETENTION_POLICY_PARAM: &str = "rp";
const BUCKET_PARAM: &str = "bucket";
const ORGANIZATION_PARAM: &str = "org";

/// InfluxDB API generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointVersion {
    /// Database and retention policy addressing
    #[default]
    V1,
    /// Organization and bucket addressing
    V2,
}

impl fmt::Display for EndpointVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointVersion::V1 => write!(f, "v1"),
            EndpointVersion::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for EndpointVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v1" | "1" => Ok(EndpointVersion::V1),
            "v2" | "2" => Ok(EndpointVersion::V2),
            other => Err(format!("Unknown endpoint version: {}", other)),
        }
    }
}

/// Parameters extracted from a connection URL.
///
/// Every addressing field is optional here: `None` means the parameter was not
/// in the URL, `Some("")` means it was given without a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    /// Scheme, host and path with the user-info and query string removed
    pub endpoint_url: String,

    /// Percent-decoded `user[:password]` from the URL authority
    pub credentials: Option<Credentials>,

    /// `db` parameter (v1)
    pub database: Option<String>,

    /// `rp` parameter (v1)
    pub retention_policy: Option<String>,

    /// `bucket` parameter (v2)
    pub bucket: Option<String>,

    /// `org` parameter (v2)
    pub organization: Option<String>,
}

impl ConnectionDescriptor {
    /// Parse a connection URL of the form
    /// `scheme://[user:pass@]host[:port][/path]?param=value[&param=value...]`.
    ///
    /// Unrecognized parameters are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use influxdb_transport::connection::ConnectionDescriptor;
    /// let descriptor = ConnectionDescriptor::parse("http://localhost:8086/?db=mydb&rp=autogen");
    ///
    /// assert_eq!(descriptor.endpoint_url, "http://localhost:8086");
    /// assert_eq!(descriptor.database.as_deref(), Some("mydb"));
    /// assert_eq!(descriptor.retention_policy.as_deref(), Some("autogen"));
    /// assert!(descriptor.bucket.is_none());
    /// assert!(descriptor.credentials.is_none());
    /// ```
    pub fn parse(url: &str) -> Self {
        let (endpoint, user_info) = split_user_info(url);

        Self {
            endpoint_url: parse_url(&endpoint).to_string(),
            credentials: user_info.and_then(decode_user_info),
            database: parse_parameter(url, DATABASE_PARAM),
            retention_policy: parse_parameter(url, RETENTION_POLICY_PARAM),
            bucket: parse_parameter(url, BUCKET_PARAM),
            organization: parse_parameter(url, ORGANIZATION_PARAM),
        }
    }
}

impl FromStr for ConnectionDescriptor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Split the user-info off a URL.
///
/// Returns the URL without `user[:password]@` and the raw user-info text.
/// User-info can only appear before the first `/`, `?` or `#` following the
/// scheme separator; an `@` anywhere else is left alone.
pub fn split_user_info(url: &str) -> (String, Option<&str>) {
    let Some(scheme_end) = url.find("://").map(|pos| pos + 3) else {
        return (url.to_string(), None);
    };

    let rest = &url[scheme_end..];
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());

    match rest[..authority_end].rfind('@') {
        Some(at) => (
            format!("{}{}", &url[..scheme_end], &rest[at + 1..]),
            Some(&rest[..at]),
        ),
        None => (url.to_string(), None),
    }
}

// A password without a user name is still a credential.
fn decode_user_info(user_info: &str) -> Option<Credentials> {
    if user_info.is_empty() {
        return None;
    }
    let (user, password) = user_info.split_once(':').unwrap_or((user_info, ""));
    Some(Credentials::new(
        percent_decode_str(user).decode_utf8_lossy(),
        percent_decode_str(password).decode_utf8_lossy(),
    ))
}

/// Strip the query string from a URL.
///
/// A `/` directly in front of the `?` is dropped as well, so the endpoint never
/// ends in a dangling separator.
pub fn parse_url(url: &str) -> &str {
    match url.find('?') {
        Some(pos) => {
            let base = &url[..pos];
            base.strip_suffix('/').unwrap_or(base)
        }
        None => url,
    }
}

/// Extract the raw value of a named query parameter.
///
/// Looks for `?name=` first and `&name=` second. The value runs up to the next
/// `&` or the end of the URL and is returned as written (no percent-decoding).
pub fn parse_parameter(url: &str, name: &str) -> Option<String> {
    let first = format!("?{}=", name);
    let subsequent = format!("&{}=", name);

    let (pos, marker_len) = url
        .find(&first)
        .map(|pos| (pos, first.len()))
        .or_else(|| url.find(&subsequent).map(|pos| (pos, subsequent.len())))?;

    let value = &url[pos + marker_len..];
    let value = match value.find('&') {
        Some(end) => &value[..end],
        None => value,
    };

    Some(value.to_string())
}

/// Validated, version-specific addressing of an endpoint.
///
/// Only combinations that are legal for the version can be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addressing {
    /// Database with optional retention policy
    V1 {
        database: String,
        retention_policy: Option<String>,
    },
    /// Organization and bucket
    V2 { organization: String, bucket: String },
}

impl Addressing {
    /// Check a descriptor against the rules of `version`.
    ///
    /// The error names the first offending parameter.
    pub fn resolve(
        descriptor: &ConnectionDescriptor,
        version: EndpointVersion,
    ) -> Result<Self, ConfigurationError> {
        match version {
            EndpointVersion::V1 => {
                let database =
                    required(&descriptor.database, DATABASE_PARAM, version)?.to_string();
                forbidden(&descriptor.bucket, BUCKET_PARAM, version)?;
                forbidden(&descriptor.organization, ORGANIZATION_PARAM, version)?;

                Ok(Addressing::V1 {
                    database,
                    retention_policy: descriptor.retention_policy.clone(),
                })
            }
            EndpointVersion::V2 => {
                forbidden(&descriptor.database, DATABASE_PARAM, version)?;
                forbidden(&descriptor.retention_policy, RETENTION_POLICY_PARAM, version)?;
                let bucket = required(&descriptor.bucket, BUCKET_PARAM, version)?.to_string();
                let organization =
                    required(&descriptor.organization, ORGANIZATION_PARAM, version)?.to_string();

                Ok(Addressing::V2 {
                    organization,
                    bucket,
                })
            }
        }
    }

    /// Endpoint version this addressing belongs to.
    pub fn version(&self) -> EndpointVersion {
        match self {
            Addressing::V1 { .. } => EndpointVersion::V1,
            Addressing::V2 { .. } => EndpointVersion::V2,
        }
    }

    /// Database name, v1 only.
    pub fn database(&self) -> Option<&str> {
        match self {
            Addressing::V1 { database, .. } => Some(database),
            Addressing::V2 { .. } => None,
        }
    }
}

fn required<'a>(
    value: &'a Option<String>,
    parameter: &'static str,
    version: EndpointVersion,
) -> Result<&'a str, ConfigurationError> {
    match value.as_deref() {
        None => Err(ConfigurationError::MissingParameter { parameter, version }),
        Some("") => Err(ConfigurationError::EmptyParameter { parameter, version }),
        Some(value) => Ok(value),
    }
}

fn forbidden(
    value: &Option<String>,
    parameter: &'static str,
    version: EndpointVersion,
) -> Result<(), ConfigurationError> {
    if value.is_some() {
        return Err(ConfigurationError::UnsupportedParameter { parameter, version });
    }
    Ok(())
}
