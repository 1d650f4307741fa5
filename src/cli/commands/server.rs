use clap::Subcommand;
use serde_json::json;

use crate::cli::client::RadarClient;
use crate::cli::utils::{output_json, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check server health from the /health endpoint")]
    Health,

    #[command(about = "Verify that the bearer token is accepted")]
    Me,

    #[command(about = "Show the Authorization and User-Agent headers the server received")]
    Headers,
}

pub async fn handle(
    cmd: ServerCommands,
    client: &RadarClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Health => {
            let health = client.health().await?;
            match output_format {
                OutputFormat::Json => output_json(&health),
                OutputFormat::Text => {
                    println!("Server is healthy (time: {})", health.time);
                    Ok(())
                }
            }
        }
        ServerCommands::Me => {
            let me = client.secure_me().await?;
            output_success(
                &output_format,
                "Token accepted",
                Some(json!({ "ok": me.ok })),
            )
        }
        ServerCommands::Headers => {
            let headers = client.debug_headers().await?;
            match output_format {
                OutputFormat::Json => output_json(&headers),
                OutputFormat::Text => {
                    println!(
                        "Authorization: {}",
                        headers.authorization.as_deref().unwrap_or("(none)")
                    );
                    println!(
                        "User-Agent: {}",
                        headers.user_agent.as_deref().unwrap_or("(none)")
                    );
                    Ok(())
                }
            }
        }
    }
}
