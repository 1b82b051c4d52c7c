//! Tests for report writers (text, CSV, JSON)

use chatpulse::analyzer::{Analysis, ChatAnalyzer};
use chatpulse::core::output::{to_csv, to_json, to_text, write_csv, write_json, write_text};
use chatpulse::core::{DateRange, Encoding, Transcript};
use chatpulse::format::{ReportFormat, render_report, write_report};
use std::fs;
use tempfile::tempdir;

fn sample_analysis() -> Analysis {
    // 06/03/23 is a Monday
    let transcript = Transcript::new(
        "\
06/03/23, 09:00 - Alice: one
06/03/23, 09:30 - Bob: two
continued
07/03/23, 21:15 - Alice: three
08/03/23, 09:45 - Bob: four
",
        Encoding::Utf8,
    );
    let range = DateRange::parse("06/03/23", "12/03/23").unwrap();
    ChatAnalyzer::new()
        .analyze_transcript(&transcript, &range)
        .unwrap()
}

// ============================================================================
// Text Writer Tests
// ============================================================================

mod text_writer_tests {
    use super::*;

    #[test]
    fn test_titles_carry_the_range() {
        let text = to_text(&sample_analysis());
        assert!(text.contains("Messages by hour of day (06/03/23 to 12/03/23)"));
        assert!(text.contains("Messages by weekday (06/03/23 to 12/03/23)"));
    }

    #[test]
    fn test_every_bucket_is_drawn() {
        let text = to_text(&sample_analysis());
        // 2 titles + 24 hours + 7 days + 1 blank separator
        assert_eq!(text.lines().count(), 34);
        assert!(text.lines().any(|l| l.starts_with("00 |")));
        assert!(text.lines().any(|l| l.starts_with("23 |")));
        assert!(text.lines().any(|l| l.starts_with("Sunday    |")));
    }

    #[test]
    fn test_busiest_bucket_gets_full_bar() {
        let text = to_text(&sample_analysis());
        let nine = text.lines().find(|l| l.starts_with("09 |")).unwrap();
        assert_eq!(nine.matches('█').count(), 40);
        assert!(nine.ends_with(" 3"));

        let nine_pm = text.lines().find(|l| l.starts_with("21 |")).unwrap();
        assert_eq!(nine_pm.matches('█').count(), 14);

        let empty = text.lines().find(|l| l.starts_with("05 |")).unwrap();
        assert_eq!(empty.matches('█').count(), 0);
        assert!(empty.ends_with(" 0"));
    }

    #[test]
    fn test_write_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let analysis = sample_analysis();
        write_text(&analysis, path.to_str().unwrap()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), to_text(&analysis));
    }
}

// ============================================================================
// CSV Writer Tests
// ============================================================================

mod csv_writer_tests {
    use super::*;

    #[test]
    fn test_csv_header_and_rows() {
        let csv = to_csv(&sample_analysis()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Chart;Bucket;Label;Count");
        assert_eq!(lines.len(), 1 + 24 + 7);
        assert_eq!(lines[1], "hourly;0;00;0");
        assert_eq!(lines[10], "hourly;9;09;3");
        assert_eq!(lines[25], "weekday;0;Monday;2");
        assert_eq!(lines[31], "weekday;6;Sunday;0");
    }

    #[test]
    fn test_csv_is_readable_with_semicolon_delimiter() {
        let csv = to_csv(&sample_analysis()).unwrap();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(csv.as_bytes());

        let total: u64 = reader
            .records()
            .map(|r| r.unwrap()[3].parse::<u64>().unwrap())
            .sum();
        // Each message is counted once per chart
        assert_eq!(total, 8);
    }

    #[test]
    fn test_write_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let analysis = sample_analysis();
        write_csv(&analysis, path.to_str().unwrap()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), to_csv(&analysis).unwrap());
    }
}

// ============================================================================
// JSON Writer Tests
// ============================================================================

mod json_writer_tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = to_json(&sample_analysis()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["start_date"], "06/03/23");
        assert_eq!(value["end_date"], "12/03/23");
        assert_eq!(value["encoding"], "UTF-8");
        assert_eq!(value["transcript_lines"], 5);
        assert_eq!(value["message_count"], 4);
        assert_eq!(value["hourly"].as_array().unwrap().len(), 24);
        assert_eq!(value["weekday"].as_array().unwrap().len(), 7);
        assert_eq!(value["hourly"][9]["count"], 3);
        assert_eq!(value["hourly"][9]["label"], "09");
        assert_eq!(value["weekday"][1]["label"], "Tuesday");
        assert_eq!(value["weekday"][1]["count"], 1);
    }

    #[test]
    fn test_write_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json(&sample_analysis(), path.to_str().unwrap()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["message_count"], 4);
    }
}

// ============================================================================
// Format dispatch
// ============================================================================

#[test]
fn test_render_report_dispatches() {
    let analysis = sample_analysis();
    assert_eq!(render_report(&analysis, ReportFormat::Text).unwrap(), to_text(&analysis));
    assert_eq!(render_report(&analysis, ReportFormat::Csv).unwrap(), to_csv(&analysis).unwrap());
    assert_eq!(render_report(&analysis, ReportFormat::Json).unwrap(), to_json(&analysis).unwrap());
}

#[test]
fn test_write_report_from_detected_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("activity.csv");
    let path = path.to_str().unwrap();

    let format = ReportFormat::from_path(path).unwrap();
    write_report(&sample_analysis(), path, format).unwrap();
    assert!(fs::read_to_string(path).unwrap().starts_with("Chart;Bucket;Label;Count\n"));
}

#[test]
fn test_write_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("report.json");
    let err = write_report(&sample_analysis(), path.to_str().unwrap(), ReportFormat::Json).unwrap_err();
    assert!(err.is_io());
}
