//! `dapi config` command implementation

use crate::storage::config::{ClientConfig, Overrides, Settings, Source};
use crate::storage::paths::ConfigPaths;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the `config` command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Save connection settings
    Set(SetArgs),
    /// Show the current configuration
    Show,
}

/// Arguments for config set
#[derive(Args)]
pub struct SetArgs {
    /// Daemon API base URL (default: http://localhost/v1.33)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Daemon Unix socket (default: /var/run/docker.sock)
    #[arg(long)]
    pub socket: Option<PathBuf>,
}

/// Execute the `config` command
pub fn execute(
    args: ConfigArgs,
    paths: &ConfigPaths,
    overrides: &Overrides,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommands::Set(set_args) => {
            if let Some(ref base_url) = set_args.base_url {
                crate::client::parse_base_url(base_url)?;
            }

            let mut config = ClientConfig::load(paths)?;
            config.merge(ClientConfig {
                base_url: set_args.base_url,
                socket_path: set_args.socket,
            });
            config.save(paths)?;
            println!("Configuration saved");
        }
        ConfigCommands::Show => {
            let config = ClientConfig::load(paths)?;
            let settings = Settings::resolve(&config, overrides);

            println!("Current config:");
            println!(
                "  Base URL: {}{}",
                settings.base_url,
                source_note(settings.base_url_source)
            );
            println!(
                "  Socket: {}{}",
                settings.socket_path.display(),
                source_note(settings.socket_source)
            );
            println!("  Config file: {}", paths.config_file().display());
        }
    }

    Ok(())
}

fn source_note(source: Source) -> String {
    match source {
        Source::ConfigFile => String::new(),
        other => format!(" ({})", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_persists_and_merges() {
        let tmp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_root(tmp.path());

        let set = |base_url: Option<&str>, socket: Option<&str>| ConfigArgs {
            command: ConfigCommands::Set(SetArgs {
                base_url: base_url.map(String::from),
                socket: socket.map(PathBuf::from),
            }),
        };

        execute(set(Some("http://localhost/v1.43"), None), &paths, &Overrides::default())
            .unwrap();
        execute(set(None, Some("/run/docker.sock")), &paths, &Overrides::default()).unwrap();

        let config = ClientConfig::load(&paths).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost/v1.43"));
        assert_eq!(config.socket_path, Some(PathBuf::from("/run/docker.sock")));
    }

    #[test]
    fn test_set_rejects_invalid_base_url() {
        let tmp = TempDir::new().unwrap();
        let paths = ConfigPaths::with_root(tmp.path());

        let args = ConfigArgs {
            command: ConfigCommands::Set(SetArgs {
                base_url: Some("unix:///var/run/docker.sock".to_string()),
                socket: None,
            }),
        };

        assert!(execute(args, &paths, &Overrides::default()).is_err());
        assert!(!paths.config_file().exists());
    }

    #[test]
    fn test_source_note() {
        assert_eq!(source_note(Source::Default), " (default)");
        assert_eq!(source_note(Source::Override), " (override)");
        assert_eq!(source_note(Source::ConfigFile), "");
    }
}
