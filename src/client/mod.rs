//! Daemon client: base URL handling, request dispatch and response decoding

pub mod query;
pub mod transport;

pub use query::Query;
pub use transport::{RawResponse, Transport};

use crate::storage::config::Settings;
use crate::{DapiError, Result};
use hyper::body::Bytes;
use hyper::{Method, StatusCode};
use serde_json::Value;
use std::path::Path;
use url::Url;

/// Client bound to one daemon base URL and transport
pub struct EngineClient {
    base_url: Url,
    transport: Transport,
}

impl EngineClient {
    /// Creates a client from resolved settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = parse_base_url(&settings.base_url)?;
        let transport = Transport::select(&base_url, &settings.socket_path)?;
        Ok(Self {
            base_url,
            transport,
        })
    }

    /// Creates a client that always goes through the given Unix socket.
    pub fn with_socket(base_url: &str, socket_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            transport: Transport::Unix(transport::UnixTransport::new(socket_path)),
        })
    }

    /// Creates a client that always dials the base URL over TCP.
    pub fn with_tcp(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            transport: Transport::Tcp(transport::TcpTransport::new()?),
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Where requests are sent, for messages
    pub fn target(&self) -> String {
        self.transport.target(&self.base_url)
    }

    /// Builds the full URL for an endpoint path below the base path.
    ///
    /// URL parsing collapses dot segments, so a name such as `../info` would
    /// silently address another endpoint. Such paths are refused instead.
    pub fn endpoint(&self, path: &str, query: &Query) -> Result<Url> {
        if has_dot_segment(path) {
            return Err(DapiError::InvalidPath(path.to_string()));
        }

        let mut url = self.base_url.clone();
        let base_path = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{}{}", base_path, path));
        url.set_query(None);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    /// Sends a request and checks the status.
    ///
    /// 2xx and 304 Not Modified are returned to the caller; anything else
    /// becomes `DapiError::Daemon` with the daemon's message.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let url = self.endpoint(path, query)?;
        let body = body.map(serde_json::to_vec).transpose()?;

        tracing::debug!("{} {} via {}", method, url, self.target());
        let response = self.transport.send(method, &url, body).await?;
        tracing::debug!("Daemon answered {}", response.status);

        if response.status.is_success() || response.status == StatusCode::NOT_MODIFIED {
            Ok(response)
        } else {
            Err(DapiError::Daemon {
                status: response.status.as_u16(),
                message: daemon_message(response.status, &response.body),
            })
        }
    }

    /// Performs a GET request and decodes the body.
    pub async fn get(&self, path: &str, query: &Query) -> Result<Value> {
        let response = self.send(Method::GET, path, query, None).await?;
        decode_body(&response.body)
    }

    /// Performs a POST request with an optional JSON body and decodes the reply.
    pub async fn post(&self, path: &str, query: &Query, body: Option<&Value>) -> Result<Value> {
        let response = self.send(Method::POST, path, query, body).await?;
        decode_body(&response.body)
    }

    /// Performs a DELETE request and decodes the body.
    pub async fn delete(&self, path: &str, query: &Query) -> Result<Value> {
        let response = self.send(Method::DELETE, path, query, None).await?;
        decode_body(&response.body)
    }
}

/// Whether any segment is `.` or `..`, including percent-encoded dots.
///
/// Backslashes count as separators: `http` URLs treat them like `/`.
fn has_dot_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    })
}

/// Parses and validates a base URL.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| DapiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(DapiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    if url.host_str().is_none() {
        return Err(DapiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}

/// Decodes a response body: empty is null, JSON is parsed, anything else is text.
pub fn decode_body(body: &Bytes) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(_) => Ok(Value::String(
            String::from_utf8_lossy(body).trim_end().to_string(),
        )),
    }
}

/// Extracts the error message the daemon sent with a failed request.
pub fn daemon_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        if let Some(Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => format!("request failed with status {}", status.as_u16()),
    }
}
