//! dapi CLI entry point
//!
//! A command-line client for the Docker Engine API.

use clap::Parser;
use dapi::cli::{connect, Cli, Commands};
use dapi::storage::paths::ConfigPaths;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = cli.overrides();

    match cli.command {
        Commands::Config(args) => {
            dapi::cli::config::execute(args, &ConfigPaths::new()?, &overrides)
        }
        Commands::Containers(args) => {
            dapi::cli::containers::execute(args, &connect(&overrides)?).await
        }
        Commands::Images(args) => {
            dapi::cli::images::execute(args, &connect(&overrides)?).await
        }
        Commands::Networks(args) => {
            dapi::cli::networks::execute(args, &connect(&overrides)?).await
        }
        Commands::Volumes(args) => {
            dapi::cli::volumes::execute(args, &connect(&overrides)?).await
        }
        Commands::Info => dapi::cli::system::execute_info(&connect(&overrides)?).await,
        Commands::Version => {
            dapi::cli::system::execute_version(&connect(&overrides)?).await
        }
        Commands::Ping => dapi::cli::system::execute_ping(&connect(&overrides)?).await,
    }
}
