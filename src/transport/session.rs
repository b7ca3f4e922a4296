//! HTTP session abstraction and its reqwest implementation.
//!
//! The transport never talks to reqwest directly; it hands an immutable
//! [`HttpRequest`] to an [`HttpSession`] and inspects the [`HttpResponse`].
//! Connection pooling, TLS and socket handling stay inside the session.

use async_trait::async_trait;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::time::Duration;

use crate::connection::{HttpConfig, ProxyConfig};
use crate::error::ConfigurationError;

use super::messages::{HttpRequest, HttpResponse, Method};

/// libcurl-compatible failure codes reported in [`super::messages::TransportFailure`].
pub mod failure_code {
    pub const FAILED_INIT: i32 = 2;
    pub const URL_MALFORMAT: i32 = 3;
    pub const COULDNT_RESOLVE_HOST: i32 = 6;
    pub const COULDNT_CONNECT: i32 = 7;
    pub const OPERATION_TIMEDOUT: i32 = 28;
    pub const TOO_MANY_REDIRECTS: i32 = 47;
    pub const SEND_ERROR: i32 = 55;
    pub const RECV_ERROR: i32 = 56;
}

/// Executes composed requests.
///
/// Implementations must not fail for HTTP-level errors: every outcome,
/// including network failures, is reported through the returned
/// [`HttpResponse`].
#[async_trait]
pub trait HttpSession: Send + Sync {
    /// Perform one request attempt, honoring both timeouts it carries.
    async fn execute(&self, request: HttpRequest) -> HttpResponse;

    /// Adopt the timeouts of the transport that owns this session.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the session cannot apply them.
    fn configure(&mut self, config: &HttpConfig) -> Result<(), ConfigurationError>;

    /// Route all `http` and `https` traffic through a proxy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidProxy` if the proxy is rejected.
    fn set_proxy(&mut self, proxy: &ProxyConfig) -> Result<(), ConfigurationError>;
}

/// [`HttpSession`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestSession {
    client: reqwest::Client,
    config: HttpConfig,
    proxy: Option<reqwest::Proxy>,
}

impl ReqwestSession {
    /// Build a session with the given timeouts and no proxy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a timeout is zero or the client cannot
    /// be built.
    pub fn new(config: HttpConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let client = Self::build_client(&config, None)
            .map_err(|e| ConfigurationError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            config,
            proxy: None,
        })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    // System proxy variables are ignored; proxies are only set explicitly.
    fn build_client(
        config: &HttpConfig,
        proxy: Option<&reqwest::Proxy>,
    ) -> Result<reqwest::Client, reqwest::Error> {
        let builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .no_proxy();

        let builder = match proxy {
            Some(proxy) => builder.proxy(proxy.clone()),
            None => builder,
        };
        builder.build()
    }

    /// The pooled client, or a dedicated one when a request asks for a
    /// different connect timeout.
    fn client_for(&self, connect_timeout: Duration) -> Result<Cow<'_, reqwest::Client>, reqwest::Error> {
        if connect_timeout == self.config.connect_timeout {
            return Ok(Cow::Borrowed(&self.client));
        }

        let config = self.config.with_connect_timeout(connect_timeout);
        Self::build_client(&config, self.proxy.as_ref()).map(Cow::Owned)
    }
}

#[async_trait]
impl HttpSession for ReqwestSession {
    async fn execute(&self, request: HttpRequest) -> HttpResponse {
        let url = request.full_url();
        let client = match self.client_for(request.connect_timeout) {
            Ok(client) => client,
            Err(e) => return HttpResponse::failed(classify(&e), describe(&e)),
        };

        let mut builder = match request.method {
            Method::Get => client.get(&url),
            Method::Post => client.post(&url),
        }
        .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(credentials) = &request.basic_auth {
            builder = builder.basic_auth(credentials.username(), Some(credentials.password()));
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return HttpResponse::failed(classify(&e), describe(&e)),
        };

        let status = response.status();
        let reason = reason_phrase(&response);

        match response.text().await {
            Ok(body) => HttpResponse::new(status.as_u16(), reason, body),
            Err(e) => HttpResponse::failed(classify(&e), describe(&e)),
        }
    }

    fn set_proxy(&mut self, proxy: &ProxyConfig) -> Result<(), ConfigurationError> {
        let mut forward = reqwest::Proxy::all(proxy.url())
            .map_err(|e| ConfigurationError::InvalidProxy(e.to_string()))?;
        if let Some(auth) = proxy.authentication() {
            forward = forward.basic_auth(&auth.user, &auth.password);
        }

        self.client = Self::build_client(&self.config, Some(&forward))
            .map_err(|e| ConfigurationError::ClientBuild(e.to_string()))?;
        self.proxy = Some(forward);

        tracing::debug!(proxy = %proxy.url(), "proxy configured");
        Ok(())
    }

    fn configure(&mut self, config: &HttpConfig) -> Result<(), ConfigurationError> {
        config.validate()?;
        if *config == self.config {
            return Ok(());
        }

        self.client = Self::build_client(config, self.proxy.as_ref())
            .map_err(|e| ConfigurationError::ClientBuild(e.to_string()))?;
        self.config = *config;

        tracing::debug!(
            connect_timeout = ?config.connect_timeout,
            request_timeout = ?config.request_timeout,
            "session timeouts configured"
        );
        Ok(())
    }
}

/// Reason phrase sent by the server, or the canonical one for the status.
///
/// hyper only records the phrase when it differs from the canonical text.
fn reason_phrase(response: &reqwest::Response) -> String {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .or_else(|| response.status().canonical_reason())
        .unwrap_or_default()
        .to_string()
}

/// Map a reqwest error onto a libcurl-compatible code.
fn classify(err: &reqwest::Error) -> i32 {
    if err.is_timeout() {
        failure_code::OPERATION_TIMEDOUT
    } else if err.is_connect() {
        if describe(err).contains("dns error") {
            failure_code::COULDNT_RESOLVE_HOST
        } else {
            failure_code::COULDNT_CONNECT
        }
    } else if err.is_redirect() {
        failure_code::TOO_MANY_REDIRECTS
    } else if err.is_builder() {
        failure_code::URL_MALFORMAT
    } else if err.is_request() {
        failure_code::SEND_ERROR
    } else if err.is_body() || err.is_decode() {
        failure_code::RECV_ERROR
    } else {
        failure_code::FAILED_INIT
    }
}

/// Error message including its source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_session_with_default_config() {
        let session = ReqwestSession::new(HttpConfig::default()).unwrap();
        assert_eq!(session.config().connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_session_rejects_zero_connect_timeout() {
        let config = HttpConfig::default().with_connect_timeout(Duration::ZERO);
        let err = ReqwestSession::new(config).unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::InvalidTimeout {
                name: "connect_timeout"
            }
        );
    }

    #[test]
    fn test_set_proxy_with_credentials() {
        let mut session = ReqwestSession::new(HttpConfig::default()).unwrap();
        let proxy = ProxyConfig::new("http://proxy.local:3128").with_authentication("bob", "hunter2");

        assert!(session.set_proxy(&proxy).is_ok());
    }

    #[test]
    fn test_configure_replaces_timeouts() {
        let mut session = ReqwestSession::new(HttpConfig::default()).unwrap();
        let config = HttpConfig::default()
            .with_connect_timeout(Duration::from_secs(2))
            .with_request_timeout(Duration::from_secs(30));

        session.configure(&config).unwrap();

        assert_eq!(*session.config(), config);
    }

    #[test]
    fn test_configure_rejects_zero_request_timeout() {
        let mut session = ReqwestSession::new(HttpConfig::default()).unwrap();
        let config = HttpConfig::default().with_request_timeout(Duration::ZERO);

        assert_eq!(
            session.configure(&config),
            Err(ConfigurationError::InvalidTimeout {
                name: "request_timeout"
            })
        );
        assert_eq!(*session.config(), HttpConfig::default());
    }

    #[test]
    fn test_configure_keeps_proxy() {
        let mut session = ReqwestSession::new(HttpConfig::default()).unwrap();
        session
            .set_proxy(&ProxyConfig::new("http://proxy.local:3128"))
            .unwrap();

        session
            .configure(&HttpConfig::default().with_connect_timeout(Duration::from_secs(1)))
            .unwrap();

        assert!(session.proxy.is_some());
    }

    #[test]
    fn test_client_for_matching_connect_timeout_reuses_pool() {
        let session = ReqwestSession::new(HttpConfig::default()).unwrap();

        assert!(matches!(
            session.client_for(Duration::from_secs(10)),
            Ok(Cow::Borrowed(_))
        ));
        assert!(matches!(
            session.client_for(Duration::from_secs(1)),
            Ok(Cow::Owned(_))
        ));
    }

    #[test]
    fn test_set_proxy_rejects_invalid_url() {
        let mut session = ReqwestSession::new(HttpConfig::default()).unwrap();
        let err = session.set_proxy(&ProxyConfig::new("http://[invalid")).unwrap_err();

        assert!(matches!(err, ConfigurationError::InvalidProxy(_)));
    }
}
