use clap::Subcommand;
use serde_json::json;

use crate::cli::client::RadarClient;
use crate::cli::utils::{output_empty_collection, output_entry, output_entry_table, output_json, output_success};
use crate::cli::OutputFormat;
use crate::services::{CreateRadarEntry, UpdateClassification, UpdateTechnology};

#[derive(Subcommand)]
pub enum EntryCommands {
    #[command(about = "List all radar entries, newest first")]
    List,

    #[command(about = "Create a radar entry")]
    Create {
        #[arg(help = "Technology title")]
        title: String,
        #[arg(long, help = "Ring: adopt, trial, assess or hold")]
        status: String,
        #[arg(long, help = "Quadrant: languages-frameworks, techniques, tools or platforms")]
        quadrant: String,
        #[arg(long, help = "Justification for the classification")]
        reason: String,
        #[arg(long, help = "Free-text description")]
        description: Option<String>,
        #[arg(long, help = "Hide the entry from the public radar")]
        private: bool,
    },

    #[command(about = "Change the ring and/or quadrant of an entry")]
    Classify {
        #[arg(help = "Entry ID")]
        id: String,
        #[arg(long, help = "New ring")]
        status: Option<String>,
        #[arg(long, help = "New quadrant")]
        quadrant: Option<String>,
        #[arg(long, help = "Justification for the change")]
        reason: String,
    },

    #[command(about = "Edit the title, description or quadrant of an entry")]
    Edit {
        #[arg(help = "Entry ID")]
        id: String,
        #[arg(long, help = "New title")]
        title: Option<String>,
        #[arg(long, help = "New description")]
        description: Option<String>,
        #[arg(long, help = "New quadrant")]
        quadrant: Option<String>,
    },

    #[command(about = "Delete an entry")]
    Delete {
        #[arg(help = "Entry ID")]
        id: String,
    },
}

pub async fn handle(
    cmd: EntryCommands,
    client: &RadarClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        EntryCommands::List => {
            let entries = client.list_radar().await?;
            if entries.is_empty() {
                return output_empty_collection(&output_format, "entries", "No radar entries");
            }
            match output_format {
                OutputFormat::Json => output_json(&entries),
                OutputFormat::Text => {
                    output_entry_table(&entries);
                    Ok(())
                }
            }
        }
        EntryCommands::Create {
            title,
            status,
            quadrant,
            reason,
            description,
            private,
        } => {
            let body = CreateRadarEntry {
                title: Some(title),
                private: Some(private),
                status: Some(status),
                quadrant: Some(quadrant),
                reason: Some(reason),
                description,
            };
            let entry = client.create_radar(&body).await?;
            output_entry(&output_format, "Created radar entry", &entry)
        }
        EntryCommands::Classify {
            id,
            status,
            quadrant,
            reason,
        } => {
            let body = UpdateClassification {
                status,
                quadrant,
                reason: Some(reason),
            };
            let entry = client.update_classification(&id, &body).await?;
            output_entry(&output_format, "Updated classification", &entry)
        }
        EntryCommands::Edit {
            id,
            title,
            description,
            quadrant,
        } => {
            let body = UpdateTechnology {
                title,
                description,
                quadrant,
            };
            let entry = client.update_technology(&id, &body).await?;
            output_entry(&output_format, "Updated technology", &entry)
        }
        EntryCommands::Delete { id } => {
            client.delete_radar(&id).await?;
            output_success(
                &output_format,
                &format!("Deleted radar entry {}", id),
                Some(json!({ "id": id })),
            )
        }
    }
}
