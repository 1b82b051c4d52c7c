//! Line-level parsing of chat transcripts.
//!
//! This module holds the timestamp grammars shared by the date-range filter
//! and the activity aggregator.

pub mod whatsapp;

// Re-export commonly used items
pub use whatsapp::{TimestampGrammar, parse_filter_date, parse_message_timestamp};
