//! `dapi info`, `dapi version` and `dapi ping` command implementations

use crate::cli::output;
use crate::client::EngineClient;

/// Execute the `info` command
pub async fn execute_info(client: &EngineClient) -> anyhow::Result<()> {
    let info = client.system_info().await?;
    output::print_json(&info)
}

/// Execute the `version` command
pub async fn execute_version(client: &EngineClient) -> anyhow::Result<()> {
    let version = client.version().await?;
    output::print_json(&version)
}

/// Execute the `ping` command
pub async fn execute_ping(client: &EngineClient) -> anyhow::Result<()> {
    let reply = client.ping().await?;
    if reply.is_empty() {
        println!("Daemon at {} is running", client.target());
    } else {
        println!("Daemon at {} is running ({})", client.target(), reply);
    }
    Ok(())
}
