//! # Chatpulse
//!
//! A Rust library for slicing WhatsApp chat exports by date and charting when
//! the conversation happens.
//!
//! ## Overview
//!
//! Given the `.zip` a phone produces when exporting a chat, chatpulse:
//! - extracts the transcript and decodes it (UTF-8, UTF-8 with BOM, UTF-16, Latin-1)
//! - keeps only the lines whose message falls inside a `DD/MM/YY` date range,
//!   continuation lines included
//! - counts messages per hour of day and per weekday
//! - composes an AI prompt from a template and the filtered transcript
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatpulse::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let range = DateRange::parse("01/03/23", "31/03/23")?;
//!     let archive = std::fs::read("WhatsApp Chat with Family.zip")?;
//!
//!     let analysis = ChatAnalyzer::new().analyze_archive(&archive, &range)?;
//!     print!("{}", to_text(&analysis));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`analyzer`] - The end-to-end pipeline ([`ChatAnalyzer`](analyzer::ChatAnalyzer))
//! - [`core`] - Pipeline stages
//!   - [`core::archive`] - Transcript extraction from the export ZIP
//!   - [`core::encoding`] - Ordered encoding fallback
//!   - [`core::filter`] - [`DateRange`](core::DateRange), [`filter_transcript`](core::filter_transcript)
//!   - [`core::stats`] - [`aggregate`](core::aggregate), hour and weekday histograms
//!   - [`core::output`] - Text, CSV and JSON report writers
//! - [`parsing`] - Timestamp grammars of message-start lines
//! - [`config`] - [`AnalyzerConfig`](config::AnalyzerConfig), [`AppSettings`](config::AppSettings)
//! - [`prompt`] - Prompt templating for the AI collaborator
//! - [`format`] - [`ReportFormat`](format::ReportFormat) and format dispatch
//! - [`cli`] - CLI types (requires the `cli` feature)
//! - [`error`] - Unified error types ([`ChatpulseError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod analyzer;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parsing;
pub mod prompt;

// Re-export the main types at the crate root for convenience
pub use error::{ChatpulseError, Result};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatpulse::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatpulseError, Result};

    // Pipeline
    pub use crate::analyzer::{Analysis, ChatAnalyzer, InputKind};

    // Configuration
    pub use crate::config::{AnalyzerConfig, AppSettings};

    // Stages
    pub use crate::core::encoding::Encoding;
    pub use crate::core::filter::{DateRange, filter_transcript};
    pub use crate::core::models::{FilteredTranscript, Transcript};
    pub use crate::core::stats::{ActivityStats, HourHistogram, WeekdayHistogram, aggregate};

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};
    pub use crate::core::output::{to_text, write_text};
    pub use crate::format::{ReportFormat, render_report, write_report};

    // Prompt
    pub use crate::prompt::PromptTemplate;
}
