//! The end-to-end pipeline: archive → text → date filter → activity stats.
//!
//! [`ChatAnalyzer`] wires the core stages together under one
//! [`AnalyzerConfig`]. Each call is independent; the analyzer holds no state
//! besides its configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatpulse::analyzer::ChatAnalyzer;
//! use chatpulse::core::DateRange;
//!
//! # fn main() -> chatpulse::Result<()> {
//! let analyzer = ChatAnalyzer::new();
//! let range = DateRange::parse("01/03/23", "31/03/23")?;
//!
//! let bytes = std::fs::read("WhatsApp Chat.zip")?;
//! let analysis = analyzer.analyze_archive(&bytes, &range)?;
//!
//! for (hour, count) in analysis.stats.hourly.iter() {
//!     println!("{hour:02}h {count}");
//! }
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AnalyzerConfig;
use crate::core::archive::extract_transcript_with_limit;
use crate::core::encoding::{Encoding, decode_transcript};
use crate::core::filter::{DateRange, filter_transcript};
use crate::core::models::{FilteredTranscript, Transcript};
use crate::core::stats::{ActivityStats, aggregate};
use crate::error::Result;

/// Local file header / empty-archive signatures of a ZIP file.
const ZIP_SIGNATURES: [&[u8]; 2] = [b"PK\x03\x04", b"PK\x05\x06"];

/// Kind of input handed to the analyzer.
///
/// # Example
///
/// ```rust
/// use chatpulse::analyzer::InputKind;
/// use std::str::FromStr;
///
/// assert_eq!(InputKind::detect(b"PK\x03\x04rest"), InputKind::Archive);
/// assert_eq!(InputKind::detect(b"01/03/23, 09:15 - A: hi"), InputKind::Text);
/// assert_eq!(InputKind::from_str("zip").unwrap(), InputKind::Archive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// A ZIP export holding the transcript
    #[serde(alias = "zip")]
    Archive,
    /// A bare transcript file
    #[serde(alias = "txt")]
    Text,
}

impl InputKind {
    /// Sniffs the input kind from the leading bytes.
    pub fn detect(bytes: &[u8]) -> Self {
        if ZIP_SIGNATURES.iter().any(|sig| bytes.starts_with(sig)) {
            InputKind::Archive
        } else {
            InputKind::Text
        }
    }

    /// Returns all accepted names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["archive", "zip", "text", "txt"]
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Archive => write!(f, "ZIP archive"),
            InputKind::Text => write!(f, "text transcript"),
        }
    }
}

impl std::str::FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "archive" | "zip" => Ok(InputKind::Archive),
            "text" | "txt" => Ok(InputKind::Text),
            _ => Err(format!(
                "Unknown input kind: '{}'. Expected one of: {}",
                s,
                InputKind::all_names().join(", ")
            )),
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// The requested range
    pub range: DateRange,
    /// The encoding that decoded the transcript
    pub encoding: Encoding,
    /// Lines of the transcript inside the range
    pub transcript: FilteredTranscript,
    /// Hour and weekday histograms of the filtered lines
    pub stats: ActivityStats,
}

/// Runs the transcript pipeline under one configuration.
#[derive(Debug, Clone, Default)]
pub struct ChatAnalyzer {
    config: AnalyzerConfig,
}

impl ChatAnalyzer {
    /// Creates an analyzer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with custom configuration.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Extracts and decodes the transcript of a ZIP export.
    pub fn load_archive(&self, archive: &[u8]) -> Result<Transcript> {
        let raw = extract_transcript_with_limit(
            archive,
            &self.config.transcript_extension,
            self.config.max_transcript_bytes,
        )?;
        self.load_text(&raw)
    }

    /// Decodes a bare transcript.
    pub fn load_text(&self, bytes: &[u8]) -> Result<Transcript> {
        decode_transcript(bytes, &self.config.encodings)
    }

    /// Loads bytes of either kind.
    pub fn load(&self, bytes: &[u8], kind: InputKind) -> Result<Transcript> {
        match kind {
            InputKind::Archive => self.load_archive(bytes),
            InputKind::Text => self.load_text(bytes),
        }
    }

    /// Reads a file from disk and loads it, detecting its kind.
    pub fn load_path(&self, path: &Path) -> Result<Transcript> {
        let bytes = fs::read(path)?;
        let kind = InputKind::detect(&bytes);
        info!(path = %path.display(), %kind, "loading input");
        self.load(&bytes, kind)
    }

    /// Filters and aggregates an already-decoded transcript.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::NoContentInRange`](crate::ChatpulseError::NoContentInRange)
    /// if no line falls inside `range`.
    pub fn analyze_transcript(&self, transcript: &Transcript, range: &DateRange) -> Result<Analysis> {
        if range.is_inverted() {
            warn!(range = %range, "start date is after end date, nothing can match");
        }

        let filtered = filter_transcript(transcript.text(), range)?;
        let stats = aggregate(filtered.as_str());

        info!(
            lines = filtered.line_count(),
            messages = stats.message_count,
            encoding = %transcript.encoding(),
            "analysis complete"
        );

        Ok(Analysis {
            range: *range,
            encoding: transcript.encoding(),
            transcript: filtered,
            stats,
        })
    }

    /// Runs the whole pipeline on a ZIP export.
    pub fn analyze_archive(&self, archive: &[u8], range: &DateRange) -> Result<Analysis> {
        let transcript = self.load_archive(archive)?;
        self.analyze_transcript(&transcript, range)
    }

    /// Runs the whole pipeline on a file of either kind.
    pub fn analyze_path(&self, path: &Path, range: &DateRange) -> Result<Analysis> {
        let transcript = self.load_path(path)?;
        self.analyze_transcript(&transcript, range)
    }

    /// Extracts a ZIP export and returns only the filtered text.
    pub fn filter_archive(&self, archive: &[u8], range: &DateRange) -> Result<FilteredTranscript> {
        let transcript = self.load_archive(archive)?;
        filter_transcript(transcript.text(), range)
    }
}
