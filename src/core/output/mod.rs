//! Report writers for activity histograms.
//!
//! This module provides writers for different report formats:
//! - [`write_text`] / [`to_text`] - terminal bar charts, always available
//! - [`write_csv`] / [`to_csv`] - one row per bucket, semicolon delimited - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - range, encoding and both histograms - requires `json-output` feature
//!
//! Every writer emits all 24 hours and all 7 weekdays, zero counts included.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatpulse::Result<()> {
//! use chatpulse::analyzer::ChatAnalyzer;
//! use chatpulse::core::DateRange;
//! use chatpulse::core::output::{to_text, write_csv, write_json};
//!
//! let range = DateRange::parse("01/03/23", "31/03/23")?;
//! let analysis = ChatAnalyzer::new().analyze_path("chat.zip".as_ref(), &range)?;
//!
//! print!("{}", to_text(&analysis));
//! write_csv(&analysis, "activity.csv")?;
//! write_json(&analysis, "activity.json")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
pub use text_writer::{to_text, write_text};

use serde::Serialize;

use crate::core::stats::{HourHistogram, WeekdayHistogram};

/// Which histogram a [`ChartRow`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Chart {
    Hourly,
    Weekday,
}

impl Chart {
    /// Title used above the chart.
    pub fn title(self) -> &'static str {
        match self {
            Chart::Hourly => "Messages by hour of day",
            Chart::Weekday => "Messages by weekday",
        }
    }
}

impl std::fmt::Display for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chart::Hourly => write!(f, "hourly"),
            Chart::Weekday => write!(f, "weekday"),
        }
    }
}

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    /// Hour 0–23, or weekday index with Monday = 0
    pub bucket: u32,
    /// Axis label: `"09"` or `"Tuesday"`
    pub label: String,
    pub count: u64,
}

/// Rows of the hour-of-day chart, 00 to 23.
pub fn hourly_rows(histogram: &HourHistogram) -> Vec<ChartRow> {
    histogram
        .iter()
        .map(|(hour, count)| ChartRow {
            bucket: hour,
            label: format!("{hour:02}"),
            count,
        })
        .collect()
}

/// Rows of the weekday chart, Monday to Sunday.
pub fn weekday_rows(histogram: &WeekdayHistogram) -> Vec<ChartRow> {
    histogram
        .iter()
        .map(|(day, count)| ChartRow {
            bucket: day.num_days_from_monday(),
            label: WeekdayHistogram::label(day).to_string(),
            count,
        })
        .collect()
}
