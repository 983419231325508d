//! HTTP/1.1 transports to the daemon: Unix domain socket or TCP

use crate::{DapiError, Result, APP_NAME, VERSION};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST, USER_AGENT};
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use std::path::{Path, PathBuf};
use tokio::net::UnixStream;
use url::{Position, Url};

/// Status and body of a daemon response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// How requests reach the daemon
pub enum Transport {
    Unix(UnixTransport),
    Tcp(TcpTransport),
}

impl Transport {
    /// Pick the transport for a base URL.
    ///
    /// `localhost` without an explicit port means the local socket; any other
    /// host or an explicit port is dialed over TCP.
    pub fn select(base_url: &Url, socket_path: &Path) -> Result<Self> {
        if uses_socket(base_url) {
            Ok(Transport::Unix(UnixTransport::new(socket_path)))
        } else {
            Ok(Transport::Tcp(TcpTransport::new()?))
        }
    }

    /// Human-readable description of where requests go
    pub fn target(&self, url: &Url) -> String {
        match self {
            Transport::Unix(unix) => format!("unix://{}", unix.socket_path().display()),
            Transport::Tcp(_) => url[..Position::BeforePath].to_string(),
        }
    }

    /// Send one request and collect the full response body
    pub async fn send(
        &self,
        method: Method,
        url: &Url,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse> {
        match self {
            Transport::Unix(unix) => unix.send(method, url, body).await,
            Transport::Tcp(tcp) => tcp.send(method, url, body).await,
        }
    }
}

/// Whether requests for this base URL go through the Unix socket
pub fn uses_socket(base_url: &Url) -> bool {
    base_url.host_str() == Some("localhost") && base_url.port().is_none()
}

/// HTTP over a Unix domain socket, one connection per request
pub struct UnixTransport {
    socket_path: PathBuf,
}

impl UnixTransport {
    pub fn new(socket_path: impl AsRef<Path>) -> Self {
        Self {
            socket_path: socket_path.as_ref().to_path_buf(),
        }
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    async fn send(&self, method: Method, url: &Url, body: Option<Vec<u8>>) -> Result<RawResponse> {
        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|reason| DapiError::Connect {
                target: self.socket_path.display().to_string(),
                reason,
            })?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io).await?;

        // Drive the connection until the response is read
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!("Connection closed: {}", e);
            }
        });

        let mut builder = Request::builder()
            .method(method)
            .uri(&url[Position::BeforePath..])
            .header(HOST, host_header(url))
            .header(USER_AGENT, user_agent())
            .header(CONTENT_TYPE, "application/json");

        let body = match body {
            Some(bytes) => {
                builder = builder.header(CONTENT_LENGTH, bytes.len());
                Full::new(Bytes::from(bytes))
            }
            None => Full::new(Bytes::new()),
        };

        let request = builder
            .body(body)
            .map_err(|e| DapiError::Request(e.to_string()))?;

        let response = sender.send_request(request).await?;
        let status = response.status();
        let body = response.into_body().collect().await?.to_bytes();

        Ok(RawResponse { status, body })
    }
}

/// HTTP over TCP (or TLS) using reqwest
pub struct TcpTransport {
    client: reqwest::Client,
}

impl TcpTransport {
    pub fn new() -> Result<Self> {
        // The daemon API is never reached through an HTTP proxy
        let client = reqwest::Client::builder()
            .user_agent(user_agent())
            .no_proxy()
            .build()?;

        Ok(Self { client })
    }

    async fn send(&self, method: Method, url: &Url, body: Option<Vec<u8>>) -> Result<RawResponse> {
        let mut request = self
            .client
            .request(method, url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(bytes) = body {
            request = request.body(bytes);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() {
                DapiError::Connect {
                    target: url[..Position::BeforePath].to_string(),
                    reason: std::io::Error::other(e),
                }
            } else {
                DapiError::Http(e)
            }
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        Ok(RawResponse { status, body })
    }
}

fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or("localhost");
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

fn user_agent() -> String {
    format!("{}/{}", APP_NAME, VERSION)
}
