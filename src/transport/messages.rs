//! Request and response values exchanged with an [`HttpSession`].
//!
//! A request is built completely before it is handed to the session; nothing
//! is accumulated on shared session state between calls.
//!
//! [`HttpSession`]: super::session::HttpSession

use crate::connection::{Credentials, HttpConfig};
use std::fmt;
use std::time::Duration;

use super::params::QueryParameters;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A fully composed request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Endpoint plus path, without query string
    pub url: String,
    pub parameters: QueryParameters,
    /// Headers in the order they were set
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub basic_auth: Option<Credentials>,
    /// Overall request timeout
    pub timeout: Duration,
    /// Limit for establishing the connection
    pub connect_timeout: Duration,
}

impl HttpRequest {
    /// Create a request without headers, body or authentication.
    pub fn new(method: Method, url: impl Into<String>, parameters: QueryParameters, timeouts: HttpConfig) -> Self {
        Self {
            method,
            url: url.into(),
            parameters,
            headers: Vec::new(),
            body: None,
            basic_auth: None,
            timeout: timeouts.request_timeout,
            connect_timeout: timeouts.connect_timeout,
        }
    }

    /// Set a header, replacing any earlier value with the same name
    /// (case-insensitive). The original position is kept.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_basic_auth(mut self, credentials: Option<Credentials>) -> Self {
        self.basic_auth = credentials;
        self
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// URL including the encoded query string.
    pub fn full_url(&self) -> String {
        if self.parameters.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, self.parameters.encode())
        }
    }
}

/// Failure below HTTP: resolution, connect, TLS, timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// libcurl-compatible error code
    pub code: i32,
    /// Diagnostic text, possibly empty
    pub message: String,
}

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
    /// Set when no HTTP response was received
    pub error: Option<TransportFailure>,
}

impl HttpResponse {
    /// Response received from the server.
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
            error: None,
        }
    }

    /// No response; the request failed at transport level.
    pub fn failed(code: i32, message: impl Into<String>) -> Self {
        Self {
            status: 0,
            reason: String::new(),
            body: String::new(),
            error: Some(TransportFailure {
                code,
                message: message.into(),
            }),
        }
    }
}
