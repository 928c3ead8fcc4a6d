use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::DrawTable;

/// Errors that can occur while writing draw results
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Giver -> Recipient` lines grouped by family
    #[default]
    Text,
    Json,
}

/// Render a draw table as plain text
///
/// ```text
/// Smiths:
///   Alice Smith -> Carl Jones
/// ```
pub fn render_text(table: &DrawTable) -> String {
    let mut out = String::new();

    for draw in table.iter() {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}:", draw.label());
        for pairing in &draw.pairings {
            let _ = writeln!(out, "  {} -> {}", pairing.giver, pairing.recipient);
        }
    }

    out
}

pub fn render_json(table: &DrawTable) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(table)?)
}

pub fn render(table: &DrawTable, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Text => Ok(render_text(table)),
        OutputFormat::Json => render_json(table),
    }
}

/// Write a rendered table to `path`, or stdout when no path is given
pub fn write_table(
    table: &DrawTable,
    format: OutputFormat,
    path: Option<&Path>,
) -> Result<(), OutputError> {
    let rendered = render(table, format)?;

    match path {
        Some(path) => {
            fs::write(path, rendered)?;
            tracing::info!("Wrote draw results to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
