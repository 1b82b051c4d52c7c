//! Core processing stages of chatpulse.
//!
//! This module contains:
//! - [`archive`] - Locating the transcript inside an export ZIP
//! - [`encoding`] - Decoding transcript bytes with an ordered candidate list
//! - [`models`] - Decoded and filtered transcript types
//! - [`filter`] - Date-range filtering with continuation-line inheritance
//! - [`stats`] - Hour-of-day and weekday histograms
//! - [`output`] - Report writers (text, CSV, JSON)
//!
//! # Quick Start
//!
//! ```rust
//! use chatpulse::core::{DateRange, aggregate, filter_transcript};
//!
//! # fn main() -> chatpulse::Result<()> {
//! let range = DateRange::parse("01/03/23", "05/03/23")?;
//! let filtered = filter_transcript("01/03/23, 09:15 - Alice: hi\n", &range)?;
//! let stats = aggregate(filtered.as_str());
//! assert_eq!(stats.hourly.get(9), 1);
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod encoding;
pub mod filter;
pub mod models;
pub mod output;
pub mod stats;

// Re-export main types for convenience
pub use archive::{extract_transcript, list_transcripts};
pub use encoding::{Encoding, decode_transcript};
pub use filter::{DateRange, filter_transcript};
pub use models::{FilteredTranscript, Transcript};
pub use stats::{ActivityStats, HourHistogram, WeekdayHistogram, aggregate};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
pub use output::{to_text, write_text};
