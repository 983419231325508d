//! `dapi images` command implementation

use crate::api::ListImagesOptions;
use crate::cli::output;
use crate::client::EngineClient;
use clap::{Args, Subcommand};

/// Arguments for the `images` command
#[derive(Args)]
pub struct ImagesArgs {
    #[command(subcommand)]
    pub command: ImagesCommands,
}

/// Image subcommands
#[derive(Subcommand)]
pub enum ImagesCommands {
    /// List images
    List(ListArgs),
    /// Display detailed information on an image
    Inspect(NameArgs),
    /// Pull an image from a registry
    Pull(PullArgs),
    /// Remove an image
    Remove(RemoveArgs),
}

/// Arguments for images list
#[derive(Args)]
pub struct ListArgs {
    /// Show all images (default hides intermediate images)
    #[arg(short, long)]
    pub all: bool,

    /// Show digests
    #[arg(long)]
    pub digests: bool,

    /// Filter output based on conditions provided (key=value)
    #[arg(short, long)]
    pub filter: Vec<String>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

/// A single image reference
#[derive(Args)]
pub struct NameArgs {
    /// Image name or ID
    pub name: String,
}

/// Arguments for images pull
#[derive(Args)]
pub struct PullArgs {
    /// Image name to pull
    pub name: String,

    /// Tag to pull (defaults to the tag in the name, or latest)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for images remove
#[derive(Args)]
pub struct RemoveArgs {
    /// Image name or ID
    pub name: String,

    /// Force removal of the image
    #[arg(short, long)]
    pub force: bool,

    /// Do not delete untagged parent images
    #[arg(long)]
    pub no_prune: bool,
}

/// Execute the `images` command
pub async fn execute(args: ImagesArgs, client: &EngineClient) -> anyhow::Result<()> {
    match args.command {
        ImagesCommands::List(list_args) => {
            let options = ListImagesOptions {
                all: list_args.all,
                digests: list_args.digests,
                filters: list_args.filter,
            };
            let images = client.list_images(&options).await?;

            if list_args.json {
                return output::print_json(&images);
            }

            let now = chrono::Utc::now();
            let rows: Vec<String> = output::items(&images)
                .iter()
                .map(|image| output::image_row(image, now))
                .collect();
            output::print_table(&output::image_header(), &rows, "No images found");
        }
        ImagesCommands::Inspect(name_args) => {
            let image = client.inspect_image(&name_args.name).await?;
            output::print_json(&image)?;
        }
        ImagesCommands::Pull(pull_args) => {
            if !pull_args.quiet {
                eprintln!("Pulling {}...", pull_args.name);
            }

            let messages = client
                .pull_image(&pull_args.name, pull_args.tag.as_deref())
                .await?;

            if !pull_args.quiet {
                // Per-layer download progress is noise once the pull is done
                for line in messages
                    .iter()
                    .filter(|m| m.progress.is_none())
                    .filter_map(|m| m.line())
                {
                    eprintln!("{}", line);
                }
            }

            match pull_args.tag {
                Some(tag) => println!("Image {}:{} pulled", pull_args.name, tag),
                None => println!("Image {} pulled", pull_args.name),
            }
        }
        ImagesCommands::Remove(rm_args) => {
            let removed = client
                .remove_image(&rm_args.name, rm_args.force, rm_args.no_prune)
                .await?;

            for line in output::image_removal_lines(&removed) {
                println!("{}", line);
            }
            println!("Image {} removed", rm_args.name);
        }
    }

    Ok(())
}
