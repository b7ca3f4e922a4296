//! Scheme and user-info extraction for backend selection.

use crate::connection::split_user_info;
use crate::error::FactoryError;
use percent_encoding::percent_decode_str;

/// A connection URL split into the parts the factory needs.
#[derive(Clone, PartialEq, Eq)]
pub struct ParsedUri {
    /// Lowercased scheme
    pub scheme: String,
    /// URL with the user-info removed
    pub url: String,
    /// Percent-decoded user name, empty when absent
    pub user: String,
    /// Percent-decoded password, empty when absent
    pub password: String,
}

impl ParsedUri {
    /// Split `scheme://[user[:password]@]rest`.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::MalformedUri` if the URL has no valid scheme.
    pub fn parse(url: &str) -> Result<Self, FactoryError> {
        let url = url.trim();
        let (scheme, _) = url
            .split_once("://")
            .ok_or_else(|| FactoryError::MalformedUri(url.to_string()))?;

        if !is_valid_scheme(scheme) {
            return Err(FactoryError::MalformedUri(url.to_string()));
        }

        let (url, user_info) = split_user_info(url);
        let (user, password) = match user_info.map(|info| info.split_once(':').unwrap_or((info, ""))) {
            Some((user, password)) => (decode(user)?, decode(password)?),
            None => (String::new(), String::new()),
        };

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            url,
            user,
            password,
        })
    }

    /// Whether the URL carried a user name or a password.
    pub fn has_credentials(&self) -> bool {
        !self.user.is_empty() || !self.password.is_empty()
    }
}

// Debug must not print the password
impl std::fmt::Debug for ParsedUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedUri")
            .field("scheme", &self.scheme)
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

fn decode(s: &str) -> Result<String, FactoryError> {
    percent_decode_str(s)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| FactoryError::MalformedUri(format!("Failed to decode user-info: {}", e)))
}
