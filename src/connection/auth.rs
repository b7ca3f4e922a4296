//! Authentication settings for InfluxDB endpoints.
//!
//! Two mutually exclusive styles are supported: HTTP Basic credentials and an
//! API token sent as `Authorization: Token <token>`.

use std::fmt;
use std::sync::Arc;

/// Header carrying the API token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Basic authentication credentials.
///
/// The password is never displayed or logged.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Arc<SecureString>,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Arc::new(SecureString::new(password.into())),
        }
    }

    /// Get the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the password (for internal use only).
    pub(crate) fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username && self.password() == other.password()
    }
}

impl Eq for Credentials {}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credentials(username: {})", self.username)
    }
}

/// InfluxDB API token.
#[derive(Clone)]
pub struct ApiToken(Arc<SecureString>);

impl ApiToken {
    /// Wrap a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Arc::new(SecureString::new(token.into())))
    }

    /// Value of the `Authorization` header for this token.
    pub(crate) fn header_value(&self) -> String {
        format!("Token {}", self.0.as_str())
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken(<redacted>)")
    }
}

/// Authentication configured on a transport.
#[derive(Debug, Clone)]
pub enum Authentication {
    /// HTTP Basic authentication
    Basic(Credentials),
    /// `Authorization: Token <token>` header
    Token(ApiToken),
}

/// Secure string that zeros memory on drop and never displays its contents.
struct SecureString {
    data: Vec<u8>,
}

impl SecureString {
    fn new(s: String) -> Self {
        Self {
            data: s.into_bytes(),
        }
    }

    fn as_str(&self) -> &str {
        // Safe because we only construct from valid UTF-8 strings
        unsafe { std::str::from_utf8_unchecked(&self.data) }
    }
}

impl Drop for SecureString {
    fn drop(&mut self) {
        for byte in &mut self.data {
            *byte = 0;
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_no_password_leak() {
        let creds = Credentials::new("admin", "secret123");

        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("admin"));
        assert!(debug.contains("redacted"));

        let display = format!("{}", creds);
        assert!(!display.contains("secret123"));
        assert!(display.contains("admin"));
    }

    #[test]
    fn test_credentials_access() {
        let creds = Credentials::new("user", "pass");

        assert_eq!(creds.username(), "user");
        assert_eq!(creds.password(), "pass");
    }

    #[test]
    fn test_credentials_clone() {
        let creds = Credentials::new("user", "pass");
        let creds2 = creds.clone();

        assert_eq!(creds.username(), creds2.username());
        assert_eq!(creds.password(), creds2.password());
    }

    #[test]
    fn test_api_token_header_value() {
        let token = ApiToken::new("my-token");
        assert_eq!(token.header_value(), "Token my-token");
    }

    #[test]
    fn test_api_token_no_leak() {
        let auth = Authentication::Token(ApiToken::new("super_secret"));

        let debug = format!("{:?}", auth);
        assert!(!debug.contains("super_secret"));
        assert!(debug.contains("redacted"));
    }
}
