//! Filter a transcript by an inclusive date range.
//!
//! This module provides [`DateRange`] for defining the window and
//! [`filter_transcript`] for cutting a transcript down to it.
//!
//! # Examples
//!
//! ```
//! use chatpulse::core::filter::{DateRange, filter_transcript};
//!
//! # fn main() -> chatpulse::Result<()> {
//! let text = "\
//! 28/02/23, 22:00 - Bob: too early
//! 01/03/23, 09:15 - Alice: hi
//! and a second line
//! 06/03/23, 08:00 - Bob: too late
//! ";
//!
//! let range = DateRange::parse("01/03/23", "05/03/23")?;
//! let filtered = filter_transcript(text, &range)?;
//!
//! assert_eq!(filtered.as_str(), "01/03/23, 09:15 - Alice: hi\nand a second line\n");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Bounds are inclusive and compared by calendar date only
//! - Lines without a `DD/MM/YY,` prefix belong to the message above them
//! - Lines before the first dated message are dropped
//! - `start > end` is not rejected; such a range simply matches nothing

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::models::FilteredTranscript;
use crate::error::{ChatpulseError, Result};
use crate::parsing::{TimestampGrammar, parse_filter_date};

/// Date format of range bounds and of the filter-stage line prefix.
pub const RANGE_DATE_FORMAT: &str = "%d/%m/%y";

/// An inclusive range of calendar dates.
///
/// # Examples
///
/// ```
/// use chatpulse::core::filter::DateRange;
/// use chrono::NaiveDate;
///
/// # fn main() -> chatpulse::Result<()> {
/// let range = DateRange::parse("01/03/23", "05/03/23")?;
///
/// assert!(range.contains(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()));
/// assert!(range.contains(NaiveDate::from_ymd_opt(2023, 3, 5).unwrap()));
/// assert!(!range.contains(NaiveDate::from_ymd_opt(2023, 3, 6).unwrap()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First included day.
    pub start: NaiveDate,
    /// Last included day.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from already-parsed dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parses both bounds from `DD/MM/YY` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`] naming the first bound that
    /// fails to parse.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_range_date(start)?, parse_range_date(end)?))
    }

    /// Returns `true` if `date` lies within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns `true` if the start lies after the end.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Both bounds formatted as `DD/MM/YY`.
    pub fn format_bounds(&self) -> (String, String) {
        (
            self.start.format(RANGE_DATE_FORMAT).to_string(),
            self.end.format(RANGE_DATE_FORMAT).to_string(),
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.format_bounds();
        write!(f, "{start} to {end}")
    }
}

/// Parse a `DD/MM/YY` bound. Surrounding whitespace is an error.
fn parse_range_date(date_str: &str) -> Result<NaiveDate> {
    // chrono skips blanks ahead of numeric fields, so check for them here.
    if date_str.trim() != date_str {
        return Err(ChatpulseError::invalid_date(date_str));
    }
    NaiveDate::parse_from_str(date_str, RANGE_DATE_FORMAT)
        .map_err(|_| ChatpulseError::invalid_date(date_str))
}

/// Keeps the lines of `text` that belong to messages dated inside `range`.
///
/// Every line carrying a `DD/MM/YY,` prefix decides, by its date alone,
/// whether it and the continuation lines below it are kept. Kept lines are
/// copied verbatim, trailing newline included.
///
/// # Errors
///
/// Returns [`ChatpulseError::NoContentInRange`] if nothing is kept.
pub fn filter_transcript(text: &str, range: &DateRange) -> Result<FilteredTranscript> {
    let mut include = false;
    let mut kept = String::new();
    let mut kept_lines = 0usize;

    for line in text.split_inclusive('\n') {
        if let Some(date) = parse_filter_date(line) {
            include = range.contains(date);
        }

        if include {
            kept.push_str(line);
            kept_lines += 1;
        }
    }

    debug!(
        kept_lines,
        range = %range,
        pattern = TimestampGrammar::FilterStage.pattern(),
        "filtered transcript"
    );

    if kept.is_empty() {
        return Err(ChatpulseError::NoContentInRange {
            start: range.start,
            end: range.end,
        });
    }

    Ok(FilteredTranscript::new(kept))
}
