//! Unified error types for chatpulse.
//!
//! This module provides a single [`ChatpulseError`] enum that covers every
//! failure of the pipeline, from opening the export archive to writing the
//! final report.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get one clear message per failure kind
//! - **Developers** get source error chains for debugging
//!
//! [`ChatpulseError::NoContentInRange`] is the only warning-class variant:
//! it means the request was valid but selected nothing. See
//! [`ChatpulseError::is_warning`].

use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::encoding::Encoding;

/// A specialized [`Result`] type for chatpulse operations.
///
/// # Example
///
/// ```rust
/// use chatpulse::error::Result;
/// use chatpulse::core::DateRange;
///
/// fn march() -> Result<DateRange> {
///     DateRange::parse("01/03/23", "31/03/23")
/// }
/// # assert!(march().is_ok());
/// ```
pub type Result<T> = std::result::Result<T, ChatpulseError>;

/// The error type for all chatpulse operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpulseError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - The temporary extraction directory can't be created
    /// - Writing a report fails
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The archive could not be opened or unpacked.
    #[error("The uploaded file is not a valid zip archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The transcript inside the archive exceeds the configured size limit.
    #[error("Transcript '{name}' is too large: {actual_size} bytes (maximum: {max_size} bytes)")]
    ArchiveTooLarge {
        /// Archive-relative name of the oversized member
        name: String,
        /// Maximum allowed size in bytes
        max_size: u64,
        /// Actual size of the member
        actual_size: u64,
    },

    /// The archive has no member with the transcript extension.
    #[error("No .{extension} file found in the archive")]
    NoTranscriptFound {
        /// The extension that was searched for (without the dot)
        extension: String,
    },

    /// None of the candidate encodings could decode the transcript.
    #[error("Unable to read the transcript with any of: {}", display_encodings(.tried))]
    UndecodableEncoding {
        /// The encodings that were tried, in order
        tried: Vec<Encoding>,
    },

    /// Filtering produced an empty transcript.
    ///
    /// This is a warning, not a failure: the inputs were valid but no
    /// message falls inside the requested range.
    #[error("No content found between {} and {}", .start.format("%d/%m/%y"), .end.format("%d/%m/%y"))]
    NoContentInRange {
        /// Inclusive lower bound of the requested range
        start: NaiveDate,
        /// Inclusive upper bound of the requested range
        end: NaiveDate,
    },

    /// A date-range bound could not be parsed.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A required settings key is absent.
    #[error("{key} is not configured{}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    MissingCredential {
        /// The settings key that is missing
        key: &'static str,
        /// The settings file, if one was loaded
        path: Option<PathBuf>,
    },

    /// The settings file could not be parsed.
    #[error("Invalid configuration{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Config {
        /// The underlying TOML error
        #[source]
        source: toml::de::Error,
        /// The settings file, if available
        path: Option<PathBuf>,
    },

    /// An unknown report format was requested.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn display_encodings(tried: &[Encoding]) -> String {
    tried
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpulseError {
    /// Creates a "no transcript" error for the given extension.
    pub fn no_transcript(extension: impl Into<String>) -> Self {
        ChatpulseError::NoTranscriptFound {
            extension: extension.into(),
        }
    }

    /// Creates an invalid date error for a `DD/MM/YY` bound.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatpulseError::InvalidDate {
            input: input.into(),
            expected: "DD/MM/YY",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatpulseError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a missing credential error.
    pub fn missing_credential(key: &'static str, path: Option<PathBuf>) -> Self {
        ChatpulseError::MissingCredential { key, path }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatpulseError::Io(_))
    }

    /// Returns `true` if the archive itself was unusable.
    pub fn is_archive(&self) -> bool {
        matches!(
            self,
            ChatpulseError::Archive(_) | ChatpulseError::ArchiveTooLarge { .. }
        )
    }

    /// Returns `true` if the archive had no transcript member.
    pub fn is_no_transcript(&self) -> bool {
        matches!(self, ChatpulseError::NoTranscriptFound { .. })
    }

    /// Returns `true` if no encoding could decode the transcript.
    pub fn is_undecodable(&self) -> bool {
        matches!(self, ChatpulseError::UndecodableEncoding { .. })
    }

    /// Returns `true` if the date range selected no messages.
    pub fn is_no_content(&self) -> bool {
        matches!(self, ChatpulseError::NoContentInRange { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatpulseError::InvalidDate { .. })
    }

    /// Returns `true` if this is a settings problem.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ChatpulseError::MissingCredential { .. } | ChatpulseError::Config { .. }
        )
    }

    /// Returns `true` if the error should be reported as a warning rather
    /// than a failure.
    pub fn is_warning(&self) -> bool {
        self.is_no_content()
    }
}

// ============================================================================
// Tests
// ============================================================================
