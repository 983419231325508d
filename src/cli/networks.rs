//! `dapi networks` command implementation

use crate::api::CreateNetworkOptions;
use crate::cli::output;
use crate::client::EngineClient;
use clap::{Args, Subcommand};

/// Arguments for the `networks` command
#[derive(Args)]
pub struct NetworksArgs {
    #[command(subcommand)]
    pub command: NetworksCommands,
}

/// Network subcommands
#[derive(Subcommand)]
pub enum NetworksCommands {
    /// List networks
    List(ListArgs),
    /// Display detailed information on a network
    Inspect(IdArgs),
    /// Create a network
    Create(CreateArgs),
    /// Remove a network
    Remove(IdArgs),
}

/// Arguments for networks list
#[derive(Args)]
pub struct ListArgs {
    /// Provide filter values (key=value)
    #[arg(short, long)]
    pub filter: Vec<String>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

/// A single network reference
#[derive(Args)]
pub struct IdArgs {
    /// Network name or ID
    pub id: String,
}

/// Arguments for networks create
#[derive(Args)]
pub struct CreateArgs {
    /// Network name
    #[arg(long)]
    pub name: String,

    /// Network driver (daemon default: bridge)
    #[arg(short, long)]
    pub driver: Option<String>,

    /// Restrict external access to the network
    #[arg(long)]
    pub internal: bool,

    /// Set metadata on the network (key=value)
    #[arg(short, long)]
    pub label: Vec<String>,
}

/// Execute the `networks` command
pub async fn execute(args: NetworksArgs, client: &EngineClient) -> anyhow::Result<()> {
    match args.command {
        NetworksCommands::List(ls_args) => {
            let networks = client.list_networks(&ls_args.filter).await?;

            if ls_args.json {
                return output::print_json(&networks);
            }

            let rows: Vec<String> = output::items(&networks)
                .iter()
                .map(output::network_row)
                .collect();
            output::print_table(&output::network_header(), &rows, "No networks found");
        }
        NetworksCommands::Inspect(id_args) => {
            let network = client.inspect_network(&id_args.id).await?;
            output::print_json(&network)?;
        }
        NetworksCommands::Create(create_args) => {
            let options = CreateNetworkOptions {
                name: create_args.name,
                driver: create_args.driver,
                internal: create_args.internal,
                labels: create_args.label,
            };
            let created = client.create_network(&options).await?;

            let id = created.get("Id").and_then(|v| v.as_str()).unwrap_or("");
            println!("Network ID: {}", id);
            if let Some(warning) = created.get("Warning").and_then(|v| v.as_str()) {
                if !warning.is_empty() {
                    eprintln!("WARNING: {}", warning);
                }
            }
        }
        NetworksCommands::Remove(id_args) => {
            client.remove_network(&id_args.id).await?;
            println!("Network {} removed", id_args.id);
        }
    }

    Ok(())
}
