//! CSV report writer.

use std::fs::File;

use crate::analyzer::Analysis;
use crate::error::Result;

use super::{Chart, ChartRow, hourly_rows, weekday_rows};

/// Writes both histograms to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Chart`, `Bucket`, `Label`, `Count`
/// - Rows: 24 hourly rows, then 7 weekday rows
/// - Encoding: UTF-8
pub fn write_csv(analysis: &Analysis, output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);
    write_records(&mut writer, analysis)?;
    writer.flush()?;
    Ok(())
}

/// Converts both histograms to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(analysis: &Analysis) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    write_records(&mut writer, analysis)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_records<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    analysis: &Analysis,
) -> Result<()> {
    writer.write_record(["Chart", "Bucket", "Label", "Count"])?;

    let charts = [
        (Chart::Hourly, hourly_rows(&analysis.stats.hourly)),
        (Chart::Weekday, weekday_rows(&analysis.stats.weekday)),
    ];
    for (chart, rows) in &charts {
        for row in rows {
            writer.write_record(build_record(*chart, row))?;
        }
    }

    Ok(())
}

fn build_record(chart: Chart, row: &ChartRow) -> [String; 4] {
    [
        chart.to_string(),
        row.bucket.to_string(),
        row.label.clone(),
        row.count.to_string(),
    ]
}
