//! Persisted client configuration and its resolution against overrides

use crate::storage::paths::ConfigPaths;
use crate::{DapiError, Result, DEFAULT_BASE_URL, DEFAULT_SOCKET_PATH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Configuration stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL override (scheme, host and API version prefix)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Daemon socket override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Load the configuration file, or an empty configuration if none exists
    pub fn load(paths: &ConfigPaths) -> Result<Self> {
        let path = paths.config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| {
            DapiError::Config(format!("malformed config file {}: {}", path.display(), e))
        })
    }

    /// Write the configuration file, creating its directory if needed
    pub fn save(&self, paths: &ConfigPaths) -> Result<()> {
        paths.ensure_directories()?;
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(paths.config_file(), contents)?;
        tracing::debug!("Saved configuration to {}", paths.config_file().display());
        Ok(())
    }

    /// Apply non-empty values from `update`, keeping existing ones otherwise
    pub fn merge(&mut self, update: ClientConfig) {
        if let Some(base_url) = update.base_url {
            self.base_url = Some(base_url);
        }
        if let Some(socket_path) = update.socket_path {
            self.socket_path = Some(socket_path);
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub socket_path: Option<PathBuf>,
}

/// Where a resolved setting came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Override,
    ConfigFile,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Override => write!(f, "override"),
            Source::ConfigFile => write!(f, "config file"),
            Source::Default => write!(f, "default"),
        }
    }
}

/// Effective settings for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub base_url_source: Source,
    pub socket_path: PathBuf,
    pub socket_source: Source,
}

impl Settings {
    /// Resolve settings with precedence: overrides > config file > defaults
    pub fn resolve(config: &ClientConfig, overrides: &Overrides) -> Self {
        let (base_url, base_url_source) = pick(
            overrides.base_url.clone(),
            config.base_url.clone(),
            DEFAULT_BASE_URL.to_string(),
        );
        let (socket_path, socket_source) = pick(
            overrides.socket_path.clone(),
            config.socket_path.clone(),
            PathBuf::from(DEFAULT_SOCKET_PATH),
        );

        Self {
            base_url,
            base_url_source,
            socket_path,
            socket_source,
        }
    }
}

fn pick<T>(over: Option<T>, file: Option<T>, default: T) -> (T, Source) {
    match (over, file) {
        (Some(value), _) => (value, Source::Override),
        (None, Some(value)) => (value, Source::ConfigFile),
        (None, None) => (default, Source::Default),
    }
}
