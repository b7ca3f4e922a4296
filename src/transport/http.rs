//! HTTP transport for InfluxDB v1 and v2 endpoints.
//!
//! Queries and commands go to `GET {endpoint}/query`, writes to
//! `POST {endpoint}/write`. The addressing parameters are derived once from
//! the connection URL and validated against the endpoint version when the
//! transport is built.

use async_trait::async_trait;
use reqwest::header::HeaderValue;

use crate::connection::auth::AUTHORIZATION_HEADER;
use crate::connection::{
    Addressing, ApiToken, Authentication, ConnectionDescriptor, Credentials, EndpointVersion,
    HttpConfig, ProxyConfig,
};
use crate::error::{ConfigurationError, TransportError};

use super::messages::{HttpRequest, Method};
use super::params::{build_parameters, QueryParameters};
use super::protocol::Transport;
use super::response::check_response;
use super::session::{HttpSession, ReqwestSession};

const QUERY_PATH: &str = "/query";
const WRITE_PATH: &str = "/write";
// The body is line protocol; the content type is kept for wire compatibility.
const WRITE_CONTENT_TYPE: &str = "application/json";

/// HTTP transport.
///
/// # Example
///
/// ```no_run
/// use influxdb_transport::connection::EndpointVersion;
/// use influxdb_transport::transport::{HttpTransport, Transport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new("http://localhost:8086/?db=mydb", EndpointVersion::V1)?;
///
/// transport.send("cpu,host=a value=1".to_string()).await?;
/// let body = transport.query("SELECT * FROM cpu").await?;
/// println!("{}", body);
/// # Ok(())
/// # }
/// ```
pub struct HttpTransport {
    endpoint_url: String,
    addressing: Addressing,
    config: HttpConfig,
    authentication: Option<Authentication>,
    session: Box<dyn HttpSession>,
}

impl HttpTransport {
    /// Create a transport with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the URL parameters do not match the
    /// endpoint version.
    pub fn new(url: &str, version: EndpointVersion) -> Result<Self, ConfigurationError> {
        Self::with_config(url, version, HttpConfig::default())
    }

    /// Create a transport with custom timeouts.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the URL parameters do not match the
    /// endpoint version or a timeout is invalid.
    pub fn with_config(
        url: &str,
        version: EndpointVersion,
        config: HttpConfig,
    ) -> Result<Self, ConfigurationError> {
        let session = ReqwestSession::new(config)?;
        Self::with_session(url, version, config, Box::new(session))
    }

    /// Create a transport on top of an existing session.
    ///
    /// The session is reconfigured with `config`, so both timeouts apply to
    /// every request it performs for this transport. User-info in `url` is
    /// removed from the endpoint and used as basic credentials.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the URL parameters do not match the
    /// endpoint version, a timeout is invalid or the session rejects the
    /// configuration.
    pub fn with_session(
        url: &str,
        version: EndpointVersion,
        config: HttpConfig,
        mut session: Box<dyn HttpSession>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let descriptor = ConnectionDescriptor::parse(url);
        let addressing = Addressing::resolve(&descriptor, version)?;
        session.configure(&config)?;

        tracing::debug!(
            endpoint = %descriptor.endpoint_url,
            version = %version,
            basic_auth = descriptor.credentials.is_some(),
            "http transport created"
        );

        Ok(Self {
            endpoint_url: descriptor.endpoint_url,
            addressing,
            config,
            authentication: descriptor.credentials.map(Authentication::Basic),
            session,
        })
    }

    /// Endpoint URL without query string.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn version(&self) -> EndpointVersion {
        self.addressing.version()
    }

    pub fn addressing(&self) -> &Addressing {
        &self.addressing
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str, parameters: QueryParameters) -> HttpRequest {
        HttpRequest::new(
            method,
            format!("{}{}", self.endpoint_url, path),
            parameters,
            self.config,
        )
    }

    // Applied last so the transport's headers override per-operation ones.
    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        match &self.authentication {
            Some(Authentication::Basic(credentials)) => {
                request.with_basic_auth(Some(credentials.clone()))
            }
            Some(Authentication::Token(token)) => {
                request.with_header(AUTHORIZATION_HEADER, token.header_value())
            }
            None => request,
        }
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<String, TransportError> {
        let request = self.authorize(request);
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            version = %self.version(),
            "dispatching request"
        );

        let response = self.session.execute(request).await;
        check_response(&response)?;
        Ok(response.body)
    }

    async fn read(&self, text: &str) -> Result<String, TransportError> {
        let parameters = build_parameters(&self.addressing).with_query(text);
        self.dispatch(self.request(Method::Get, QUERY_PATH, parameters))
            .await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint_url", &self.endpoint_url)
            .field("addressing", &self.addressing)
            .field("config", &self.config)
            .field("authentication", &self.authentication)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn query(&self, query: &str) -> Result<String, TransportError> {
        self.read(query).await
    }

    async fn send(&self, line_protocol: String) -> Result<(), TransportError> {
        let request = self
            .request(Method::Post, WRITE_PATH, build_parameters(&self.addressing))
            .with_header("Content-Type", WRITE_CONTENT_TYPE);

        self.dispatch(request.with_body(line_protocol)).await?;
        Ok(())
    }

    async fn execute(&self, command: &str) -> Result<String, TransportError> {
        self.read(command).await
    }

    async fn create_database(&self) -> Result<(), TransportError> {
        let database = match &self.addressing {
            Addressing::V1 { database, .. } => database,
            Addressing::V2 { .. } => {
                return Err(TransportError::UnsupportedOperation {
                    operation: "create_database",
                    version: self.version(),
                })
            }
        };

        let parameters = QueryParameters::new().with_query(&format!("CREATE DATABASE {}", database));
        self.dispatch(self.request(Method::Post, QUERY_PATH, parameters))
            .await?;
        Ok(())
    }

    fn set_basic_authentication(&mut self, user: &str, password: &str) -> Result<(), ConfigurationError> {
        if matches!(self.authentication, Some(Authentication::Token(_))) {
            return Err(ConfigurationError::ConflictingAuthentication);
        }
        self.authentication = Some(Authentication::Basic(Credentials::new(user, password)));
        Ok(())
    }

    fn set_api_token(&mut self, token: &str) -> Result<(), ConfigurationError> {
        if matches!(self.authentication, Some(Authentication::Basic(_))) {
            return Err(ConfigurationError::ConflictingAuthentication);
        }

        let token = ApiToken::new(token);
        HeaderValue::from_str(&token.header_value())
            .map_err(|_| ConfigurationError::InvalidApiToken)?;

        self.authentication = Some(Authentication::Token(token));
        Ok(())
    }

    fn set_proxy(&mut self, proxy: &ProxyConfig) -> Result<(), ConfigurationError> {
        self.session.set_proxy(proxy)
    }
}
