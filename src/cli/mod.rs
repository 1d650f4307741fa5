pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::cli::client::{RadarClient, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(name = "radar")]
#[command(about = "Radar CLI - Command-line client for the Tech-Radar API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, env = "RADAR_API_URL", default_value = DEFAULT_BASE_URL, help = "API base URL including /api")]
    pub url: String,

    #[arg(long, global = true, env = "RADAR_TOKEN", hide_env_values = true, help = "Bearer token for protected operations")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Server health and auth diagnostics")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Radar entry operations")]
    Entry {
        #[command(subcommand)]
        cmd: commands::entry::EntryCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = RadarClient::new(cli.url, cli.token);

    match cli.command {
        Commands::Server { cmd } => commands::server::handle(cmd, &client, output_format).await,
        Commands::Entry { cmd } => commands::entry::handle(cmd, &client, output_format).await,
    }
}
