//! `dapi containers` command implementation

use crate::api::{
    CreateContainerOptions, ListContainersOptions, LogStream, LogsOptions, StateChange,
};
use crate::cli::output;
use crate::client::EngineClient;
use clap::{Args, Subcommand};
use std::io::Write;

/// Arguments for the `containers` command
#[derive(Args)]
pub struct ContainersArgs {
    #[command(subcommand)]
    pub command: ContainersCommands,
}

/// Container subcommands
#[derive(Subcommand)]
pub enum ContainersCommands {
    /// List containers
    List(ListArgs),
    /// Display detailed information on a container
    Inspect(InspectArgs),
    /// Create a new container
    Create(CreateArgs),
    /// Start a container
    Start(IdArgs),
    /// Stop a running container
    Stop(StopArgs),
    /// Restart a container
    Restart(StopArgs),
    /// Remove a container
    Remove(RemoveArgs),
    /// Fetch the logs of a container
    Logs(LogsArgs),
}

/// Arguments for containers list
#[derive(Args)]
pub struct ListArgs {
    /// Show all containers (default shows just running)
    #[arg(short, long)]
    pub all: bool,

    /// Show n last created containers (includes all states)
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,

    /// Display total file sizes
    #[arg(short, long)]
    pub size: bool,

    /// Filter output based on conditions provided (key=value)
    #[arg(short, long)]
    pub filter: Vec<String>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

/// Arguments for containers inspect
#[derive(Args)]
pub struct InspectArgs {
    /// Container name or ID
    pub id: String,

    /// Display total file sizes
    #[arg(short, long)]
    pub size: bool,
}

/// Arguments for containers create
#[derive(Args)]
pub struct CreateArgs {
    /// Image to create the container from
    #[arg(long)]
    pub image: String,

    /// Assign a name to the container
    #[arg(long)]
    pub name: Option<String>,

    /// Set environment variables (KEY=VALUE)
    #[arg(short, long)]
    pub env: Vec<String>,

    /// Working directory inside the container
    #[arg(short, long)]
    pub workdir: Option<String>,

    /// Allocate a pseudo-TTY
    #[arg(short, long)]
    pub tty: bool,

    /// Set metadata on the container (key=value)
    #[arg(short, long)]
    pub label: Vec<String>,

    /// Command to run
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub cmd: Vec<String>,
}

/// A single container reference
#[derive(Args)]
pub struct IdArgs {
    /// Container name or ID
    pub id: String,
}

/// Arguments for containers stop and restart
#[derive(Args)]
pub struct StopArgs {
    /// Container name or ID
    pub id: String,

    /// Seconds to wait before killing the container
    #[arg(short, long)]
    pub time: Option<u32>,
}

/// Arguments for containers remove
#[derive(Args)]
pub struct RemoveArgs {
    /// Container name or ID
    pub id: String,

    /// Force the removal of a running container
    #[arg(short, long)]
    pub force: bool,

    /// Remove anonymous volumes associated with the container
    #[arg(short, long)]
    pub volumes: bool,
}

/// Arguments for containers logs
#[derive(Args)]
pub struct LogsArgs {
    /// Container name or ID
    pub id: String,

    /// Leave out stdout
    #[arg(long)]
    pub no_stdout: bool,

    /// Leave out stderr
    #[arg(long)]
    pub no_stderr: bool,

    /// Number of lines to show from the end of the logs
    #[arg(short = 'n', long)]
    pub tail: Option<String>,

    /// Show timestamps
    #[arg(short, long)]
    pub timestamps: bool,

    /// Show logs since timestamp (e.g. 2013-01-02T13:23:37Z) or UNIX seconds
    #[arg(long)]
    pub since: Option<String>,
}

impl LogsArgs {
    pub fn options(&self) -> LogsOptions {
        LogsOptions {
            stdout: !self.no_stdout,
            stderr: !self.no_stderr,
            tail: self.tail.clone(),
            timestamps: self.timestamps,
            since: self.since.clone(),
        }
    }
}

/// Execute the `containers` command
pub async fn execute(args: ContainersArgs, client: &EngineClient) -> anyhow::Result<()> {
    match args.command {
        ContainersCommands::List(list_args) => {
            let options = ListContainersOptions {
                all: list_args.all,
                limit: list_args.limit,
                size: list_args.size,
                filters: list_args.filter,
            };
            let containers = client.list_containers(&options).await?;

            if list_args.json {
                return output::print_json(&containers);
            }

            let rows: Vec<String> = output::items(&containers)
                .iter()
                .map(output::container_row)
                .collect();
            output::print_table(&output::container_header(), &rows, "No containers found");
        }
        ContainersCommands::Inspect(inspect_args) => {
            let container = client
                .inspect_container(&inspect_args.id, inspect_args.size)
                .await?;
            output::print_json(&container)?;
        }
        ContainersCommands::Create(create_args) => {
            let options = CreateContainerOptions {
                image: create_args.image,
                name: create_args.name,
                cmd: create_args.cmd,
                env: create_args.env,
                working_dir: create_args.workdir,
                tty: create_args.tty,
                labels: create_args.label,
            };
            let created = client.create_container(&options).await?;

            let id = created.get("Id").and_then(|v| v.as_str()).unwrap_or("");
            println!("Container ID: {}", id);
            let warnings = created
                .get("Warnings")
                .map(output::items)
                .unwrap_or_default();
            for warning in warnings {
                if let Some(warning) = warning.as_str() {
                    eprintln!("WARNING: {}", warning);
                }
            }
        }
        ContainersCommands::Start(id_args) => {
            match client.start_container(&id_args.id).await? {
                StateChange::Changed => println!("Container {} started", id_args.id),
                StateChange::Unchanged => {
                    println!("Container {} is already running", id_args.id)
                }
            }
        }
        ContainersCommands::Stop(stop_args) => {
            match client.stop_container(&stop_args.id, stop_args.time).await? {
                StateChange::Changed => println!("Container {} stopped", stop_args.id),
                StateChange::Unchanged => {
                    println!("Container {} is already stopped", stop_args.id)
                }
            }
        }
        ContainersCommands::Restart(stop_args) => {
            client
                .restart_container(&stop_args.id, stop_args.time)
                .await?;
            println!("Container {} restarted", stop_args.id);
        }
        ContainersCommands::Remove(rm_args) => {
            client
                .remove_container(&rm_args.id, rm_args.force, rm_args.volumes)
                .await?;
            println!("Container {} removed", rm_args.id);
        }
        ContainersCommands::Logs(logs_args) => {
            let chunks = client
                .container_logs(&logs_args.id, &logs_args.options())
                .await?;

            let mut stdout = std::io::stdout().lock();
            let mut stderr = std::io::stderr().lock();
            for chunk in chunks {
                match chunk.stream {
                    LogStream::Stderr => stderr.write_all(&chunk.data)?,
                    LogStream::Stdout | LogStream::Stdin => stdout.write_all(&chunk.data)?,
                }
            }
            stdout.flush()?;
        }
    }

    Ok(())
}
