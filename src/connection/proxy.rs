//! Proxy settings applied to both `http` and `https` forwarding.

use serde::Deserialize;
use std::fmt;

/// Proxy URL with optional proxy credentials.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyConfig {
    url: String,
    #[serde(default)]
    authentication: Option<ProxyAuthentication>,
}

/// Credentials sent to the proxy itself.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyAuthentication {
    pub user: String,
    pub password: String,
}

impl ProxyConfig {
    /// Proxy without authentication.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            authentication: None,
        }
    }

    /// Attach proxy credentials.
    pub fn with_authentication(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.authentication = Some(ProxyAuthentication {
            user: user.into(),
            password: password.into(),
        });
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn authentication(&self) -> Option<&ProxyAuthentication> {
        self.authentication.as_ref()
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("url", &self.url)
            .field("authentication", &self.authentication)
            .finish()
    }
}

impl fmt::Debug for ProxyAuthentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyAuthentication")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
