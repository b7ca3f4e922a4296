//! Common test utilities for influxdb-transport integration tests.
//!
//! Two kinds of doubles are provided:
//!
//! - [`RecordingSession`]: an in-memory `HttpSession` that records every
//!   request and answers with a canned response. Used to assert on the exact
//!   request a transport composes, or that no request was made at all.
//! - [`StubServer`]: a loopback HTTP/1.1 server on an ephemeral port that
//!   captures raw request text and replies with a fixed response. Used to
//!   exercise the reqwest-backed session end to end without an InfluxDB
//!   instance.

#![allow(dead_code)]

use async_trait::async_trait;
use influxdb_transport::connection::{HttpConfig, ProxyConfig};
use influxdb_transport::error::ConfigurationError;
use influxdb_transport::transport::{HttpRequest, HttpResponse, HttpSession};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

// ============================================================================
// Recording session
// ============================================================================

/// Session double that records requests and returns a canned response.
#[derive(Clone)]
pub struct RecordingSession {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    configs: Arc<Mutex<Vec<HttpConfig>>>,
    response: HttpResponse,
}

impl RecordingSession {
    pub fn new(response: HttpResponse) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            configs: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    /// Session answering `200 OK` with the given body.
    pub fn ok(body: &str) -> Self {
        Self::new(HttpResponse::new(200, "OK", body))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Timeouts the session was configured with, in order.
    pub fn configs(&self) -> Vec<HttpConfig> {
        self.configs.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpSession for RecordingSession {
    async fn execute(&self, request: HttpRequest) -> HttpResponse {
        self.requests.lock().unwrap().push(request);
        self.response.clone()
    }

    fn set_proxy(&mut self, _proxy: &ProxyConfig) -> Result<(), ConfigurationError> {
        Ok(())
    }

    fn configure(&mut self, config: &HttpConfig) -> Result<(), ConfigurationError> {
        self.configs.lock().unwrap().push(*config);
        Ok(())
    }
}

// ============================================================================
// Loopback stub server
// ============================================================================

/// Loopback HTTP server replying with a fixed response.
pub struct StubServer {
    /// `http://127.0.0.1:{port}`
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Start a server that answers every request with `status reason` and `body`.
    pub async fn start(status: u16, reason: &str, body: &str) -> Self {
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                captured.lock().unwrap().push(request);
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    /// Raw text of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Raw text of the only request received.
    pub fn single_request(&self) -> String {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

/// Read one request: the header block plus `content-length` bytes of body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = find_header_end(&buffer) {
            let head = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
            if buffer.len() >= header_end + 4 + content_length(&head) {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Request line (`METHOD target HTTP/1.1`) of a raw request.
pub fn request_line(raw: &str) -> &str {
    raw.lines().next().unwrap_or_default()
}

/// Body of a raw request.
pub fn request_body(raw: &str) -> &str {
    raw.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or_default()
}

/// Address of a port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
