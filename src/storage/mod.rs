//! On-disk client state: the configuration file and where it lives

pub mod config;
pub mod paths;
