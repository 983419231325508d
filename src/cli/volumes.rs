//! `dapi volumes` command implementation

use crate::api::CreateVolumeOptions;
use crate::cli::output;
use crate::client::EngineClient;
use clap::{Args, Subcommand};

/// Arguments for the `volumes` command
#[derive(Args)]
pub struct VolumesArgs {
    #[command(subcommand)]
    pub command: VolumesCommands,
}

/// Volume subcommands
#[derive(Subcommand)]
pub enum VolumesCommands {
    /// List volumes
    List(ListArgs),
    /// Display detailed information on a volume
    Inspect(NameArgs),
    /// Create a volume
    Create(CreateArgs),
    /// Remove a volume
    Remove(RemoveArgs),
}

/// Arguments for volumes list
#[derive(Args)]
pub struct ListArgs {
    /// Provide filter values (key=value)
    #[arg(short, long)]
    pub filter: Vec<String>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

/// A single volume reference
#[derive(Args)]
pub struct NameArgs {
    /// Volume name
    pub name: String,
}

/// Arguments for volumes create
#[derive(Args)]
pub struct CreateArgs {
    /// Volume name
    #[arg(long)]
    pub name: String,

    /// Volume driver name
    #[arg(short, long)]
    pub driver: Option<String>,

    /// Set metadata for a volume (key=value)
    #[arg(short, long)]
    pub label: Vec<String>,
}

/// Arguments for volumes remove
#[derive(Args)]
pub struct RemoveArgs {
    /// Volume name
    pub name: String,

    /// Force the removal of the volume
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the `volumes` command
pub async fn execute(args: VolumesArgs, client: &EngineClient) -> anyhow::Result<()> {
    match args.command {
        VolumesCommands::List(ls_args) => {
            let response = client.list_volumes(&ls_args.filter).await?;

            if ls_args.json {
                return output::print_json(&response);
            }

            let volumes = response
                .get("Volumes")
                .map(output::items)
                .unwrap_or_default();
            let rows: Vec<String> = volumes.iter().map(output::volume_row).collect();
            output::print_table(&output::volume_header(), &rows, "No volumes found");

            let warnings = response
                .get("Warnings")
                .map(output::items)
                .unwrap_or_default();
            for warning in warnings.iter().filter_map(|w| w.as_str()) {
                eprintln!("WARNING: {}", warning);
            }
        }
        VolumesCommands::Inspect(name_args) => {
            let volume = client.inspect_volume(&name_args.name).await?;
            output::print_json(&volume)?;
        }
        VolumesCommands::Create(create_args) => {
            let options = CreateVolumeOptions {
                name: create_args.name,
                driver: create_args.driver,
                labels: create_args.label,
            };
            let volume = client.create_volume(&options).await?;

            let name = volume.get("Name").and_then(|v| v.as_str()).unwrap_or("");
            println!("Volume: {}", name);
        }
        VolumesCommands::Remove(rm_args) => {
            client.remove_volume(&rm_args.name, rm_args.force).await?;
            println!("Volume {} removed", rm_args.name);
        }
    }

    Ok(())
}
