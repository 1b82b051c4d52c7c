//! JSON report writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::analyzer::Analysis;
use crate::error::Result;

use super::{ChartRow, hourly_rows, weekday_rows};

/// Serialized shape of a report.
#[derive(Serialize)]
struct JsonReport<'a> {
    start_date: String,
    end_date: String,
    encoding: &'a str,
    transcript_lines: usize,
    message_count: u64,
    hourly: Vec<ChartRow>,
    weekday: Vec<ChartRow>,
}

impl<'a> JsonReport<'a> {
    fn from_analysis(analysis: &'a Analysis) -> Self {
        let (start_date, end_date) = analysis.range.format_bounds();
        Self {
            start_date,
            end_date,
            encoding: analysis.encoding.label(),
            transcript_lines: analysis.transcript.line_count(),
            message_count: analysis.stats.message_count,
            hourly: hourly_rows(&analysis.stats.hourly),
            weekday: weekday_rows(&analysis.stats.weekday),
        }
    }
}

/// Writes the report to a JSON file.
///
/// # Format
/// ```json
/// {
///   "start_date": "01/03/23",
///   "end_date": "05/03/23",
///   "encoding": "UTF-8",
///   "transcript_lines": 3,
///   "message_count": 2,
///   "hourly": [{"bucket": 0, "label": "00", "count": 0}, ...],
///   "weekday": [{"bucket": 0, "label": "Monday", "count": 1}, ...]
/// }
/// ```
pub fn write_json(analysis: &Analysis, output_path: &str) -> Result<()> {
    let json = to_json(analysis)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the report to a pretty-printed JSON string.
pub fn to_json(analysis: &Analysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from_analysis(
        analysis,
    ))?)
}
