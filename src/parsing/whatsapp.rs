//! Line timestamp grammars for WhatsApp TXT exports.
//!
//! Two grammars are used at two different stages of the pipeline and are
//! intentionally kept separate:
//!
//! | Grammar | Example prefix | Used by |
//! |---------|----------------|---------|
//! | [`FilterStage`](TimestampGrammar::FilterStage) | `01/03/23,` | date-range filtering |
//! | [`AggregationStage`](TimestampGrammar::AggregationStage) | `3/3/2023, 9:05 PM -` | histogram counting |
//!
//! The filter-stage grammar only accepts two-digit day, month and year and
//! ignores the time. The aggregation-stage grammar accepts one or two digit
//! day and month, two or four digit years, an optional 12-hour meridiem
//! marker and requires the ` - ` separator. A line can therefore start a
//! message for filtering but be skipped when counting (or the reverse).
//! Merging the two would change which lines are treated as message starts,
//! so they stay distinct.
//!
//! A line that matches a pattern but names an impossible date or time
//! (`31/02/23`, `13:00 PM`) parses to `None`, exactly like a continuation
//! line.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// `DD/MM/YY,` at line start.
static FILTER_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2}/\d{2}/\d{2}),").expect("valid filter-stage pattern"));

/// `D/M/YY[YY], H:MM [AM|PM|a.m.|p.m.] -` at line start.
static MESSAGE_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}/\d{1,2}/\d{2,4}), (\d{1,2}:\d{2})\s?((?i:am|pm|a\.m\.|p\.m\.))?\s?-")
        .expect("valid aggregation-stage pattern")
});

/// The two timestamp grammars of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampGrammar {
    /// `DD/MM/YY,`: detects message starts while filtering by date.
    FilterStage,
    /// `D/M/Y, H:MM [meridiem] -`: full timestamp used for aggregation.
    AggregationStage,
}

impl TimestampGrammar {
    /// Returns the regex pattern of this grammar, as logged at debug level.
    pub fn pattern(self) -> &'static str {
        match self {
            TimestampGrammar::FilterStage => FILTER_DATE.as_str(),
            TimestampGrammar::AggregationStage => MESSAGE_TIMESTAMP.as_str(),
        }
    }

    /// Returns `true` if `line` starts with a valid timestamp of this grammar.
    pub fn is_message_start(self, line: &str) -> bool {
        match self {
            TimestampGrammar::FilterStage => parse_filter_date(line).is_some(),
            TimestampGrammar::AggregationStage => parse_message_timestamp(line).is_some(),
        }
    }
}

/// Parses the filter-stage `DD/MM/YY,` prefix into a calendar date.
///
/// # Example
///
/// ```rust
/// use chatpulse::parsing::whatsapp::parse_filter_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_filter_date("01/03/23, 09:15 - Alice: hi"),
///     NaiveDate::from_ymd_opt(2023, 3, 1)
/// );
/// assert_eq!(parse_filter_date("1/3/23, 09:15 - Alice: hi"), None);
/// ```
pub fn parse_filter_date(line: &str) -> Option<NaiveDate> {
    let caps = FILTER_DATE.captures(line)?;
    NaiveDate::parse_from_str(&caps[1], "%d/%m/%y").ok()
}

/// Parses the aggregation-stage timestamp prefix of a message line.
///
/// With a meridiem marker the time is read as 12-hour, otherwise as 24-hour.
///
/// # Example
///
/// ```rust
/// use chatpulse::parsing::whatsapp::parse_message_timestamp;
/// use chrono::Timelike;
///
/// let ts = parse_message_timestamp("3/3/2023, 9:05 PM - Bob: hey").unwrap();
/// assert_eq!(ts.hour(), 21);
/// ```
pub fn parse_message_timestamp(line: &str) -> Option<NaiveDateTime> {
    let caps = MESSAGE_TIMESTAMP.captures(line)?;
    let date_str = &caps[1];
    let time_str = &caps[2];

    let date_format = match date_str.rsplit('/').next().map(str::len) {
        Some(2) => "%d/%m/%y",
        Some(4) => "%d/%m/%Y",
        _ => return None,
    };

    match caps.get(3) {
        Some(marker) => {
            let marker = normalize_meridiem(marker.as_str());
            let datetime_str = format!("{date_str} {time_str} {marker}");
            NaiveDateTime::parse_from_str(&datetime_str, &format!("{date_format} %I:%M %p")).ok()
        }
        None => {
            let datetime_str = format!("{date_str} {time_str}");
            NaiveDateTime::parse_from_str(&datetime_str, &format!("{date_format} %H:%M")).ok()
        }
    }
}

/// `a.m.` / `pm` / `P.M.` → `AM` / `PM`.
fn normalize_meridiem(marker: &str) -> String {
    marker.replace('.', "").to_ascii_uppercase()
}
