//! Daemon endpoints, one client method per REST call
//!
//! Payloads are passed through as `serde_json::Value`; only request
//! parameters are typed here.

pub mod containers;
pub mod images;
pub mod networks;
pub mod system;
pub mod volumes;

pub use containers::{
    demux_logs, CreateContainerOptions, ListContainersOptions, LogChunk, LogStream, LogsOptions,
    StateChange,
};
pub use images::{parse_pull_stream, ListImagesOptions, PullMessage};
pub use networks::CreateNetworkOptions;
pub use volumes::CreateVolumeOptions;

use crate::{DapiError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Encodes `key=value` filter flags as the daemon's JSON filter map.
///
/// Repeated keys accumulate: `status=running status=paused` becomes
/// `{"status":["running","paused"]}`. Returns `None` when no filters are set.
pub fn encode_filters(filters: &[String]) -> Result<Option<String>> {
    if filters.is_empty() {
        return Ok(None);
    }

    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for filter in filters {
        let (key, value) = filter
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| DapiError::InvalidFilter(filter.clone()))?;
        map.entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }

    Ok(Some(serde_json::to_string(&map)?))
}

/// Parses `key=value` label flags into a JSON object.
pub fn parse_labels(labels: &[String]) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    for label in labels {
        let (key, value) = label
            .split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| DapiError::InvalidLabel(label.clone()))?;
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_filters() {
        assert_eq!(encode_filters(&[]).unwrap(), None);

        let filters = vec![
            "status=running".to_string(),
            "label=env=prod".to_string(),
            "status=paused".to_string(),
        ];
        assert_eq!(
            encode_filters(&filters).unwrap().as_deref(),
            Some(r#"{"label":["env=prod"],"status":["running","paused"]}"#)
        );
    }

    #[test]
    fn test_encode_filters_rejects_missing_separator() {
        let err = encode_filters(&["dangling".to_string()]).unwrap_err();
        assert!(matches!(err, DapiError::InvalidFilter(f) if f == "dangling"));

        let err = encode_filters(&["=true".to_string()]).unwrap_err();
        assert!(matches!(err, DapiError::InvalidFilter(_)));
    }

    #[test]
    fn test_parse_labels() {
        let labels = parse_labels(&["team=infra".to_string(), "empty=".to_string()]).unwrap();
        assert_eq!(labels.get("team"), Some(&Value::String("infra".to_string())));
        assert_eq!(labels.get("empty"), Some(&Value::String(String::new())));

        assert!(matches!(
            parse_labels(&["novalue".to_string()]),
            Err(DapiError::InvalidLabel(_))
        ));
    }
}
