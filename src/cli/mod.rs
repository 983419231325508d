//! CLI command definitions and handlers

pub mod config;
pub mod containers;
pub mod images;
pub mod networks;
pub mod output;
pub mod system;
pub mod volumes;

use crate::client::EngineClient;
use crate::storage::config::{ClientConfig, Overrides, Settings};
use crate::storage::paths::ConfigPaths;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dapi - a command-line client for the Docker Engine API
#[derive(Parser)]
#[command(name = "dapi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Daemon API base URL [default: http://localhost/v1.33]
    #[arg(long, env = "DAPI_BASE_URL")]
    pub base_url: Option<String>,

    /// Daemon Unix socket [default: /var/run/docker.sock]
    #[arg(long, env = "DAPI_SOCKET")]
    pub socket: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings given on the command line or through the environment
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            socket_path: self.socket.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage client configuration
    Config(config::ConfigArgs),

    /// Manage containers
    Containers(containers::ContainersArgs),

    /// Manage images
    Images(images::ImagesArgs),

    /// Manage networks
    Networks(networks::NetworksArgs),

    /// Manage volumes
    Volumes(volumes::VolumesArgs),

    /// Display system-wide information
    Info,

    /// Show the daemon version information
    Version,

    /// Check that the daemon is reachable
    Ping,
}

/// Build a client from the config file (if any) and overrides
pub fn connect(overrides: &Overrides) -> anyhow::Result<EngineClient> {
    connect_with(ConfigPaths::new().ok().as_ref(), overrides)
}

/// Without a config directory there is no config file, so defaults and
/// overrides apply.
fn connect_with(
    paths: Option<&ConfigPaths>,
    overrides: &Overrides,
) -> anyhow::Result<EngineClient> {
    let config = match paths {
        Some(paths) => ClientConfig::load(paths)?,
        None => {
            tracing::debug!("No user configuration directory, skipping config file");
            ClientConfig::default()
        }
    };
    let settings = Settings::resolve(&config, overrides);
    let client = EngineClient::from_settings(&settings)?;
    tracing::debug!("Using daemon at {}", client.target());
    Ok(client)
}
