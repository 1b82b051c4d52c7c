//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Format`] - Report format options, convertible to [`ReportFormat`]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::format::ReportFormat;

/// Chart when a WhatsApp group is busiest, and prepare its transcript
/// for an AI summary.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpulse")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpulse export.zip --start 01/03/23 --end 31/03/23
    chatpulse export.zip -s 01/03/23 -e 05/03/23 --format csv -o activity.csv
    chatpulse chat.txt -s 01/03/23 -e 05/03/23 --transcript march.txt
    chatpulse export.zip -s 01/03/23 -e 05/03/23 --prompt --config chatpulse.toml")]
pub struct Args {
    /// Path to the exported .zip archive or a bare transcript
    pub input: PathBuf,

    /// First day of the range, inclusive (DD/MM/YY)
    #[arg(short, long, value_name = "DD/MM/YY")]
    pub start: String,

    /// Last day of the range, inclusive (DD/MM/YY)
    #[arg(short, long, value_name = "DD/MM/YY")]
    pub end: String,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: Format,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Write the filtered transcript to this file
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Extension of the transcript inside the archive
    #[arg(long, default_value = "txt")]
    pub extension: String,

    /// Print the AI prompt (prompt + filtered transcript) instead of the report
    #[arg(short, long)]
    pub prompt: bool,

    /// Prompt template, overriding the configured default
    #[arg(long, value_name = "TEXT")]
    pub prompt_text: Option<String>,

    /// Settings file (default: ./chatpulse.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// AI model, overriding the configured one
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Report format options.
///
/// # Example
///
/// ```rust
/// use chatpulse::cli::Format;
/// use chatpulse::format::ReportFormat;
///
/// let format: ReportFormat = Format::Csv.into();
/// assert_eq!(format.extension(), "csv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Horizontal bar charts
    #[default]
    #[value(alias = "txt")]
    Text,

    /// CSV with semicolon delimiter
    Csv,

    /// JSON object with both histograms
    Json,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ReportFormat::from(*self))
    }
}

// Conversion to library format type
impl From<Format> for ReportFormat {
    fn from(format: Format) -> ReportFormat {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Csv => ReportFormat::Csv,
            Format::Json => ReportFormat::Json,
        }
    }
}
