//! Plain-text bar chart writer.

use std::fs::File;
use std::io::Write;

use crate::analyzer::Analysis;
use crate::error::Result;

use super::{Chart, ChartRow, hourly_rows, weekday_rows};

/// Width of the longest bar, in characters.
const MAX_BAR_WIDTH: u64 = 40;
const BAR: char = '█';

/// Writes both charts to a text file.
pub fn write_text(analysis: &Analysis, output_path: &str) -> Result<()> {
    let mut file = File::create(output_path)?;
    file.write_all(to_text(analysis).as_bytes())?;
    Ok(())
}

/// Renders both charts as horizontal bar charts.
///
/// # Format
/// ```text
/// Messages by hour of day (01/03/23 to 05/03/23)
/// 00 |                                          0
/// 09 |████████████████████████████████████████  4
/// ```
pub fn to_text(analysis: &Analysis) -> String {
    let mut out = String::new();
    render_chart(
        &mut out,
        Chart::Hourly,
        &analysis.range.to_string(),
        &hourly_rows(&analysis.stats.hourly),
    );
    out.push('\n');
    render_chart(
        &mut out,
        Chart::Weekday,
        &analysis.range.to_string(),
        &weekday_rows(&analysis.stats.weekday),
    );
    out
}

fn render_chart(out: &mut String, chart: Chart, period: &str, rows: &[ChartRow]) {
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0);
    let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);

    out.push_str(&format!("{} ({})\n", chart.title(), period));
    for row in rows {
        let width = bar_width(row.count, max);
        let bar: String = std::iter::repeat_n(BAR, width).collect();
        out.push_str(&format!(
            "{:<label_width$} |{:<bar_width$} {}\n",
            row.label,
            bar,
            row.count,
            bar_width = MAX_BAR_WIDTH as usize,
        ));
    }
}

/// Bar length scaled to the busiest bucket; any non-zero count gets at least one block.
fn bar_width(count: u64, max: u64) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    ((count * MAX_BAR_WIDTH).div_ceil(max)) as usize
}
