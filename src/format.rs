//! Report format types for the chatpulse library.
//!
//! These types don't depend on CLI frameworks, so library users can pick a
//! format without pulling in clap.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv-output")]
//! # fn example() -> chatpulse::Result<()> {
//! use chatpulse::analyzer::ChatAnalyzer;
//! use chatpulse::core::DateRange;
//! use chatpulse::format::{ReportFormat, write_report};
//!
//! let range = DateRange::parse("01/03/23", "31/03/23")?;
//! let analysis = ChatAnalyzer::new().analyze_path("chat.zip".as_ref(), &range)?;
//!
//! // Format detection from extension
//! let format = ReportFormat::from_path("activity.csv")?;
//! write_report(&analysis, "activity.csv", format)?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::analyzer::Analysis;
use crate::error::ChatpulseError;

/// Rendering of the activity histograms.
///
/// - [`Text`](ReportFormat::Text) - horizontal bar charts for a terminal
/// - [`Csv`](ReportFormat::Csv) - one row per bucket, for spreadsheets
/// - [`Json`](ReportFormat::Json) - range, encoding and both histograms
///
/// # Example
///
/// ```rust
/// use chatpulse::format::ReportFormat;
/// use std::str::FromStr;
///
/// let format = ReportFormat::from_str("json").unwrap();
/// assert_eq!(format, ReportFormat::Json);
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// Bar charts (default)
    #[default]
    #[serde(alias = "txt")]
    Text,

    /// CSV with semicolon delimiter
    Csv,

    /// Pretty-printed JSON object
    Json,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "csv", "json"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [ReportFormat] {
        &[ReportFormat::Text, ReportFormat::Csv, ReportFormat::Json]
    }

    /// Detects format from a file path based on extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatpulse::format::ReportFormat;
    ///
    /// assert_eq!(ReportFormat::from_path("out/report.CSV").unwrap(), ReportFormat::Csv);
    /// assert!(ReportFormat::from_path("report.xlsx").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self, ChatpulseError> {
        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "txt" | "text" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ChatpulseError::invalid_format(
                "report",
                format!("Unknown file extension: '.{ext}'. Expected one of: txt, csv, json"),
            )),
        }
    }

    fn required_feature(self) -> Option<&'static str> {
        match self {
            ReportFormat::Text => None,
            ReportFormat::Csv => Some("csv-output"),
            ReportFormat::Json => Some("json-output"),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "Text"),
            ReportFormat::Csv => write!(f, "CSV"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

fn feature_disabled(format: ReportFormat) -> ChatpulseError {
    ChatpulseError::invalid_format(
        "report",
        format!(
            "Report format {format} requires the '{}' feature to be enabled",
            format.required_feature().unwrap_or("default")
        ),
    )
}

/// Writes the report to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
pub fn write_report(analysis: &Analysis, path: &str, format: ReportFormat) -> Result<(), ChatpulseError> {
    match format {
        ReportFormat::Text => crate::core::output::write_text(analysis, path),
        #[cfg(feature = "csv-output")]
        ReportFormat::Csv => crate::core::output::write_csv(analysis, path),
        #[cfg(feature = "json-output")]
        ReportFormat::Json => crate::core::output::write_json(analysis, path),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders the report to a string in the specified format.
///
/// # Example
///
/// ```rust
/// use chatpulse::analyzer::ChatAnalyzer;
/// use chatpulse::core::{DateRange, Transcript, Encoding};
/// use chatpulse::format::{ReportFormat, render_report};
///
/// # fn main() -> chatpulse::Result<()> {
/// let transcript = Transcript::new("01/03/23, 09:15 - Alice: hi\n", Encoding::Utf8);
/// let range = DateRange::parse("01/03/23", "05/03/23")?;
/// let analysis = ChatAnalyzer::new().analyze_transcript(&transcript, &range)?;
///
/// let text = render_report(&analysis, ReportFormat::Text)?;
/// assert!(text.contains("Messages by hour of day"));
/// # Ok(())
/// # }
/// ```
pub fn render_report(analysis: &Analysis, format: ReportFormat) -> Result<String, ChatpulseError> {
    match format {
        ReportFormat::Text => Ok(crate::core::output::to_text(analysis)),
        #[cfg(feature = "csv-output")]
        ReportFormat::Csv => crate::core::output::to_csv(analysis),
        #[cfg(feature = "json-output")]
        ReportFormat::Json => crate::core::output::to_json(analysis),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(ReportFormat::from_str("text").unwrap(), ReportFormat::Text);
        assert_eq!(ReportFormat::from_str("TXT").unwrap(), ReportFormat::Text);
        assert_eq!(ReportFormat::from_str("csv").unwrap(), ReportFormat::Csv);
        assert_eq!(ReportFormat::from_str("Json").unwrap(), ReportFormat::Json);
        assert!(ReportFormat::from_str("jsonl").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(ReportFormat::Text.to_string(), "Text");
        assert_eq!(ReportFormat::Csv.to_string(), "CSV");
        assert_eq!(ReportFormat::Json.to_string(), "JSON");
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ReportFormat::Text.extension(), "txt");
        assert_eq!(ReportFormat::Csv.extension(), "csv");
        assert_eq!(ReportFormat::Json.extension(), "json");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ReportFormat::from_path("a.txt").unwrap(), ReportFormat::Text);
        assert_eq!(ReportFormat::from_path("/tmp/b.JSON").unwrap(), ReportFormat::Json);
        let err = ReportFormat::from_path("noext").unwrap_err();
        assert!(err.to_string().contains("noext"));
    }

    #[test]
    fn test_format_all_and_default() {
        assert_eq!(ReportFormat::all().len(), 3);
        assert_eq!(ReportFormat::default(), ReportFormat::Text);
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&ReportFormat::Csv).unwrap();
        assert_eq!(json, "\"csv\"");
        let parsed: ReportFormat = serde_json::from_str("\"txt\"").unwrap();
        assert_eq!(parsed, ReportFormat::Text);
    }
}
