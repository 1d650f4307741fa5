use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::types::RadarEntry;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(object)) = (data, response.as_object_mut()) {
                object.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: []
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

pub fn output_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Output a single radar entry after a mutation
pub fn output_entry(
    output_format: &OutputFormat,
    message: &str,
    entry: &RadarEntry,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => output_json(entry),
        OutputFormat::Text => {
            println!("✓ {}", message);
            println!("ID: {}", entry.id);
            println!("Title: {}", entry.title);
            println!("Ring: {}", entry.status);
            println!("Quadrant: {}", entry.quadrant);
            println!("Reason: {}", entry.reason);
            println!("Description: {}", entry.description);
            if entry.private {
                println!("Private: yes");
            }
            Ok(())
        }
    }
}

pub fn output_entry_table(entries: &[RadarEntry]) {
    for line in entry_table(entries) {
        println!("{}", line);
    }
}

fn entry_table(entries: &[RadarEntry]) -> Vec<String> {
    let title_width = entries
        .iter()
        .map(|e| e.title.chars().count())
        .max()
        .unwrap_or(0)
        .max("TITLE".len());

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(format!(
        "{:<36}  {:<title_width$}  {:<6}  {:<21}  {}",
        "ID", "TITLE", "RING", "QUADRANT", "UPDATED"
    ));
    for entry in entries {
        let title = if entry.private {
            format!("{} (private)", entry.title)
        } else {
            entry.title.clone()
        };
        lines.push(format!(
            "{:<36}  {:<title_width$}  {:<6}  {:<21}  {}",
            entry.id,
            title,
            entry.status.as_str(),
            entry.quadrant.as_str(),
            entry.updated_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    lines
}
