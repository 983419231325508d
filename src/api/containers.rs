//! Container endpoints

use crate::api::{encode_filters, parse_labels};
use crate::client::{EngineClient, Query};
use crate::Result;
use hyper::{Method, StatusCode};
use serde_json::{json, Value};

/// Query parameters for listing containers
#[derive(Debug, Clone, Default)]
pub struct ListContainersOptions {
    /// Include stopped containers
    pub all: bool,
    /// Return at most this many of the most recently created containers
    pub limit: Option<u32>,
    /// Include `SizeRw` and `SizeRootFs`
    pub size: bool,
    /// `key=value` filters
    pub filters: Vec<String>,
}

/// Parameters for creating a container
#[derive(Debug, Clone, Default)]
pub struct CreateContainerOptions {
    pub image: String,
    pub name: Option<String>,
    pub cmd: Vec<String>,
    pub env: Vec<String>,
    pub working_dir: Option<String>,
    pub tty: bool,
    pub labels: Vec<String>,
}

impl CreateContainerOptions {
    /// Request body for `POST /containers/create`
    pub fn body(&self) -> Result<Value> {
        let mut body = json!({
            "Image": self.image,
            "Tty": self.tty,
        });

        if !self.cmd.is_empty() {
            body["Cmd"] = json!(self.cmd);
        }
        if !self.env.is_empty() {
            body["Env"] = json!(self.env);
        }
        if let Some(ref dir) = self.working_dir {
            body["WorkingDir"] = json!(dir);
        }
        if !self.labels.is_empty() {
            body["Labels"] = Value::Object(parse_labels(&self.labels)?);
        }

        Ok(body)
    }
}

/// Query parameters for fetching logs
#[derive(Debug, Clone)]
pub struct LogsOptions {
    pub stdout: bool,
    pub stderr: bool,
    /// Number of lines from the end, or `all`
    pub tail: Option<String>,
    pub timestamps: bool,
    /// Only logs since this timestamp (UNIX seconds or RFC 3339)
    pub since: Option<String>,
}

impl Default for LogsOptions {
    fn default() -> Self {
        Self {
            stdout: true,
            stderr: true,
            tail: None,
            timestamps: false,
            since: None,
        }
    }
}

/// Outcome of a start or stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Changed,
    /// The daemon answered 304: the container was already in that state.
    Unchanged,
}

impl StateChange {
    fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::NOT_MODIFIED {
            StateChange::Unchanged
        } else {
            StateChange::Changed
        }
    }
}

/// Which output stream a log chunk belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStream {
    Stdin,
    Stdout,
    Stderr,
}

/// A piece of container output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogChunk {
    pub stream: LogStream,
    pub data: Vec<u8>,
}

impl EngineClient {
    /// `GET /containers/json`
    pub async fn list_containers(&self, options: &ListContainersOptions) -> Result<Value> {
        let query = Query::new()
            .flag("all", options.all)
            .opt("limit", options.limit)
            .flag("size", options.size)
            .opt("filters", encode_filters(&options.filters)?);
        self.get("/containers/json", &query).await
    }

    /// `GET /containers/{id}/json`
    pub async fn inspect_container(&self, id: &str, size: bool) -> Result<Value> {
        let query = Query::new().flag("size", size);
        self.get(&format!("/containers/{}/json", id), &query).await
    }

    /// `POST /containers/create`
    pub async fn create_container(&self, options: &CreateContainerOptions) -> Result<Value> {
        let query = Query::new().opt("name", options.name.as_deref());
        let body = options.body()?;
        self.post("/containers/create", &query, Some(&body)).await
    }

    /// `POST /containers/{id}/start`
    pub async fn start_container(&self, id: &str) -> Result<StateChange> {
        let response = self
            .send(
                Method::POST,
                &format!("/containers/{}/start", id),
                &Query::new(),
                None,
            )
            .await?;
        Ok(StateChange::from_status(response.status))
    }

    /// `POST /containers/{id}/stop`
    pub async fn stop_container(&self, id: &str, timeout: Option<u32>) -> Result<StateChange> {
        let query = Query::new().opt("t", timeout);
        let response = self
            .send(Method::POST, &format!("/containers/{}/stop", id), &query, None)
            .await?;
        Ok(StateChange::from_status(response.status))
    }

    /// `POST /containers/{id}/restart`
    pub async fn restart_container(&self, id: &str, timeout: Option<u32>) -> Result<()> {
        let query = Query::new().opt("t", timeout);
        self.post(&format!("/containers/{}/restart", id), &query, None)
            .await?;
        Ok(())
    }

    /// `DELETE /containers/{id}`
    pub async fn remove_container(&self, id: &str, force: bool, volumes: bool) -> Result<()> {
        let query = Query::new().flag("force", force).flag("v", volumes);
        self.delete(&format!("/containers/{}", id), &query).await?;
        Ok(())
    }

    /// `GET /containers/{id}/logs`, split into stdout and stderr chunks
    pub async fn container_logs(&self, id: &str, options: &LogsOptions) -> Result<Vec<LogChunk>> {
        let query = Query::new()
            .flag("stdout", options.stdout)
            .flag("stderr", options.stderr)
            .opt("tail", options.tail.as_deref())
            .flag("timestamps", options.timestamps)
            .opt("since", options.since.as_deref());
        let response = self
            .send(Method::GET, &format!("/containers/{}/logs", id), &query, None)
            .await?;
        Ok(demux_logs(&response.body))
    }
}

/// Splits a log body into chunks.
///
/// Containers without a TTY answer with a multiplexed stream: each frame is
/// `[stream (1 byte)][0 0 0][size (4 bytes BE)][data]`, stream 0/1/2 being
/// stdin/stdout/stderr. Anything else is raw stdout.
pub fn demux_logs(body: &[u8]) -> Vec<LogChunk> {
    if body.is_empty() {
        return Vec::new();
    }
    if !is_multiplexed(body) {
        return vec![LogChunk {
            stream: LogStream::Stdout,
            data: body.to_vec(),
        }];
    }

    let mut chunks = Vec::new();
    let mut rest = body;
    while let Some((stream, content)) = extract_log_frame(rest) {
        chunks.push(LogChunk { stream, data: content.to_vec() });
        rest = &rest[8 + content.len()..];
    }

    // A partial header carries no output; a partial payload keeps its stream.
    // Anything else that is not a frame is passed through as stdout.
    if rest.len() >= 8 {
        if is_multiplexed(rest) {
            if rest.len() > 8 {
                chunks.push(LogChunk {
                    stream: stream_of(rest[0]),
                    data: rest[8..].to_vec(),
                });
            }
        } else {
            chunks.push(LogChunk {
                stream: LogStream::Stdout,
                data: rest.to_vec(),
            });
        }
    }

    chunks
}

fn is_multiplexed(body: &[u8]) -> bool {
    body.len() >= 8 && body[0] <= 2 && body[1..4] == [0, 0, 0]
}

fn stream_of(byte: u8) -> LogStream {
    match byte {
        0 => LogStream::Stdin,
        1 => LogStream::Stdout,
        _ => LogStream::Stderr,
    }
}

fn extract_log_frame(buffer: &[u8]) -> Option<(LogStream, &[u8])> {
    if !is_multiplexed(buffer) {
        return None;
    }

    let stream = stream_of(buffer[0]);
    let size = u32::from_be_bytes([buffer[4], buffer[5], buffer[6], buffer[7]]) as usize;

    let frame_end = 8 + size;
    if buffer.len() < frame_end {
        return None;
    }

    Some((stream, &buffer[8..frame_end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(stream: u8, data: &[u8]) -> Vec<u8> {
        let mut out = vec![stream, 0, 0, 0];
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(data);
        out
    }

    #[test]
    fn test_demux_multiplexed() {
        let mut body = frame(1, b"hello\n");
        body.extend(frame(2, b"oops\n"));
        body.extend(frame(1, b""));

        let chunks = demux_logs(&body);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].stream, LogStream::Stdout);
        assert_eq!(chunks[0].data, b"hello\n");
        assert_eq!(chunks[1].stream, LogStream::Stderr);
        assert_eq!(chunks[1].data, b"oops\n");
        assert!(chunks[2].data.is_empty());
    }

    #[test]
    fn test_demux_raw_tty_output() {
        let chunks = demux_logs(b"plain tty output\n");
        assert_eq!(
            chunks,
            vec![LogChunk {
                stream: LogStream::Stdout,
                data: b"plain tty output\n".to_vec(),
            }]
        );
    }

    #[test]
    fn test_demux_truncated_frame() {
        let mut body = frame(1, b"complete\n");
        let partial = frame(2, b"cut short");
        body.extend_from_slice(&partial[..12]);

        let chunks = demux_logs(&body);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].data, b"complete\n");
        assert_eq!(chunks[1].stream, LogStream::Stderr);
        assert_eq!(chunks[1].data, b"cut ");
    }

    #[test]
    fn test_demux_drops_partial_header() {
        let mut body = frame(2, b"err\n");
        body.extend_from_slice(&frame(1, b"next")[..5]);

        let chunks = demux_logs(&body);
        assert_eq!(
            chunks,
            vec![LogChunk {
                stream: LogStream::Stderr,
                data: b"err\n".to_vec(),
            }]
        );

        // A complete header with no payload bytes yet
        let mut body = frame(1, b"out\n");
        body.extend_from_slice(&frame(2, b"later")[..8]);
        assert_eq!(demux_logs(&body).len(), 1);
    }

    #[test]
    fn test_demux_empty() {
        assert!(demux_logs(b"").is_empty());
    }

    #[test]
    fn test_create_body() {
        let options = CreateContainerOptions {
            image: "nginx:alpine".to_string(),
            name: Some("web".to_string()),
            cmd: vec!["nginx".to_string(), "-g".to_string(), "daemon off;".to_string()],
            env: vec!["PORT=8080".to_string()],
            working_dir: None,
            tty: false,
            labels: vec!["app=web".to_string()],
        };

        let body = options.body().unwrap();
        assert_eq!(body["Image"], "nginx:alpine");
        assert_eq!(body["Cmd"][2], "daemon off;");
        assert_eq!(body["Env"][0], "PORT=8080");
        assert_eq!(body["Labels"]["app"], "web");
        assert!(body.get("WorkingDir").is_none());
        // Name travels in the query string
        assert!(body.get("Name").is_none());
    }
}
