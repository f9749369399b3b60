use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "robonav")]
#[command(about = "Voice commands and map clicks turned into robot navigation goals")]
#[command(version)]
struct Cli {
    /// Working directory used to find .robonav/config.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Listen for transcripts on stdin and dispatch the commands they contain
    Listen,

    /// Show how a single transcript would be interpreted, without moving the robot
    Interpret {
        /// The spoken phrase
        transcript: String,

        /// Resolve against an empty catalog instead of fetching detections
        #[arg(long)]
        offline: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Send the robot to the world point under a map pixel
    Click {
        px: f64,
        py: f64,

        /// Print the goal without sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// List the pixel position of every detected object on the map image
    Overlay {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new .robonav/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    let config_path = cli.config;
    let load_config = || cli::load_config(&work_dir, config_path.as_deref());

    match cli.command {
        Commands::Listen => {
            cli::listen::listen_command(&load_config()?).await?;
        }
        Commands::Interpret {
            transcript,
            offline,
            json,
        } => {
            cli::interpret::interpret_command(&load_config()?, &transcript, offline, json).await?;
        }
        Commands::Click { px, py, dry_run } => {
            cli::map::click_command(&load_config()?, px, py, dry_run).await?;
        }
        Commands::Overlay { json } => {
            cli::map::overlay_command(&load_config()?, json).await?;
        }
        Commands::Init { force } => {
            cli::init::init_command(&work_dir, config_path.clone(), force).await?;
        }
    }

    Ok(())
}
