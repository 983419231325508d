//! dapi - a command-line client for the Docker Engine API
//!
//! This crate talks to a container engine daemon over its local Unix socket
//! (or TCP), issuing one REST call per command and printing the JSON or
//! tabular result.

pub mod api;
pub mod cli;
pub mod client;
pub mod storage;

use thiserror::Error;

/// Main error type for dapi operations
#[derive(Error, Debug)]
pub enum DapiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP protocol error: {0}")]
    Hyper(#[from] hyper::Error),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("Cannot connect to the daemon at {target}: {reason}")]
    Connect {
        target: String,
        reason: std::io::Error,
    },

    /// The daemon answered with a non-success status.
    #[error("{message}")]
    Daemon { status: u16, message: String },

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A resource name that would change which endpoint is called.
    #[error("Invalid resource path {0}: `.` and `..` segments are not allowed")]
    InvalidPath(String),

    #[error("Invalid filter {0}: expected key=value")]
    InvalidFilter(String),

    #[error("Invalid label {0}: expected key=value")]
    InvalidLabel(String),

    /// An error reported inside a progress stream that started successfully.
    #[error("{0}")]
    Progress(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DapiError {
    /// HTTP status reported by the daemon, if this is a daemon error
    pub fn status(&self) -> Option<u16> {
        match self {
            DapiError::Daemon { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DapiError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "dapi";

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost/v1.33";

/// Daemon socket used when none is configured
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/docker.sock";
