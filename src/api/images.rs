//! Image endpoints

use crate::api::encode_filters;
use crate::client::{EngineClient, Query};
use crate::{DapiError, Result};
use hyper::Method;
use serde::Deserialize;
use serde_json::Value;

/// Query parameters for listing images
#[derive(Debug, Clone, Default)]
pub struct ListImagesOptions {
    /// Include intermediate images
    pub all: bool,
    /// Include `RepoDigests`
    pub digests: bool,
    /// `key=value` filters
    pub filters: Vec<String>,
}

/// One message of the progress stream the daemon sends while pulling
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullMessage {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_detail: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

impl PullMessage {
    /// Error text carried by this message, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error_detail
            .as_ref()
            .and_then(|detail| detail.message.as_deref())
            .or(self.error.as_deref())
    }

    /// Single-line rendering, e.g. `a1b2c3: Pull complete`
    pub fn line(&self) -> Option<String> {
        let status = self.status.as_deref()?;
        Some(match self.id.as_deref() {
            Some(id) => format!("{}: {}", id, status),
            None => status.to_string(),
        })
    }
}

impl EngineClient {
    /// `GET /images/json`
    pub async fn list_images(&self, options: &ListImagesOptions) -> Result<Value> {
        let query = Query::new()
            .flag("all", options.all)
            .flag("digests", options.digests)
            .opt("filters", encode_filters(&options.filters)?);
        self.get("/images/json", &query).await
    }

    /// `GET /images/{name}/json`
    pub async fn inspect_image(&self, name: &str) -> Result<Value> {
        self.get(&format!("/images/{}/json", name), &Query::new())
            .await
    }

    /// `POST /images/create?fromImage=...`
    ///
    /// Fails if the progress stream reports an error, even though the
    /// daemon already answered 200.
    pub async fn pull_image(&self, name: &str, tag: Option<&str>) -> Result<Vec<PullMessage>> {
        let query = Query::new().param("fromImage", name).opt("tag", tag);
        let response = self
            .send(Method::POST, "/images/create", &query, None)
            .await?;
        parse_pull_stream(&response.body)
    }

    /// `DELETE /images/{name}`
    pub async fn remove_image(&self, name: &str, force: bool, no_prune: bool) -> Result<Value> {
        let query = Query::new().flag("force", force).flag("noprune", no_prune);
        self.delete(&format!("/images/{}", name), &query).await
    }
}

/// Parses a stream of JSON progress messages.
pub fn parse_pull_stream(body: &[u8]) -> Result<Vec<PullMessage>> {
    let mut messages = Vec::new();
    for message in serde_json::Deserializer::from_slice(body).into_iter::<PullMessage>() {
        let message = message?;
        if let Some(error) = message.error_message() {
            return Err(DapiError::Progress(error.to_string()));
        }
        messages.push(message);
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pull_stream() {
        let body = br#"{"status":"Pulling from library/alpine","id":"3.19"}
{"status":"Pulling fs layer","progressDetail":{},"id":"c6a83fedfae6"}
{"status":"Downloading","progressDetail":{"current":1024,"total":3408729},"progress":"[>   ]","id":"c6a83fedfae6"}
{"status":"Digest: sha256:c5b1261d6d3e43071626931fc004f70149baeba2c8ec672bd4f27761f8e1ad6b"}
{"status":"Status: Downloaded newer image for alpine:3.19"}
"#;

        let messages = parse_pull_stream(body).unwrap();
        assert_eq!(messages.len(), 5);
        assert_eq!(
            messages[0].line().as_deref(),
            Some("3.19: Pulling from library/alpine")
        );
        assert_eq!(messages[2].progress.as_deref(), Some("[>   ]"));
        assert_eq!(
            messages[4].line().as_deref(),
            Some("Status: Downloaded newer image for alpine:3.19")
        );
    }

    #[test]
    fn test_parse_pull_stream_error() {
        let body = br#"{"status":"Pulling from library/nope"}
{"errorDetail":{"message":"manifest for nope:latest not found"},"error":"manifest unknown"}
"#;

        let err = parse_pull_stream(body).unwrap_err();
        assert!(
            matches!(err, DapiError::Progress(ref m) if m == "manifest for nope:latest not found")
        );
    }

    #[test]
    fn test_parse_pull_stream_empty() {
        assert!(parse_pull_stream(b"").unwrap().is_empty());
    }
}
