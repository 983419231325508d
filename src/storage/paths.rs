//! Path management for the user configuration directory

use crate::{DapiError, Result, APP_NAME};
use std::path::{Path, PathBuf};

/// Manages paths for dapi's configuration storage
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    /// Create a new ConfigPaths instance using the default root (e.g. ~/.config/dapi/)
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            DapiError::Config(
                "Could not determine user configuration directory. Please ensure HOME is set."
                    .to_string(),
            )
        })?;

        Ok(Self {
            root: config_dir.join(APP_NAME),
        })
    }

    /// Create a new ConfigPaths instance with a custom root
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Client configuration file
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }
}
