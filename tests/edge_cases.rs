//! Edge case tests for chatpulse
//!
//! These tests cover boundary conditions of the timestamp grammars, the
//! date filter and the encoding fallback that regular unit and integration
//! tests don't reach.

use chatpulse::core::encoding::{Encoding, decode_transcript};
use chatpulse::core::{DateRange, aggregate, filter_transcript};
use chatpulse::parsing::{TimestampGrammar, parse_filter_date, parse_message_timestamp};
use chrono::{Datelike, NaiveDate, Timelike, Weekday};

fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

// =========================================================================
// Filter-stage grammar
// =========================================================================

#[test]
fn test_preamble_before_first_message_is_dropped() {
    let text = "\
Messages and calls are end-to-end encrypted.
01/03/23, 09:15 - Alice: hi
";
    let filtered = filter_transcript(text, &range("01/03/23", "01/03/23")).unwrap();
    assert_eq!(filtered.as_str(), "01/03/23, 09:15 - Alice: hi\n");
}

#[test]
fn test_impossible_date_is_a_continuation() {
    let text = "\
01/03/23, 09:15 - Alice: hi
31/02/23, quoted nonsense
02/03/23, 10:00 - Bob: out
31/02/23, more nonsense
";
    assert_eq!(parse_filter_date("31/02/23, quoted nonsense"), None);
    let filtered = filter_transcript(text, &range("01/03/23", "01/03/23")).unwrap();
    assert_eq!(
        filtered.as_str(),
        "01/03/23, 09:15 - Alice: hi\n31/02/23, quoted nonsense\n"
    );
}

#[test]
fn test_four_digit_year_is_not_a_filter_boundary() {
    // The filter grammar only knows DD/MM/YY, so this line inherits the
    // decision of the message above it, yet the aggregator still counts it.
    let text = "\
01/03/23, 09:15 - Alice: hi
01/03/2023, 22:00 - Bob: long year
";
    let filtered = filter_transcript(text, &range("01/03/23", "01/03/23")).unwrap();
    assert_eq!(filtered.line_count(), 2);
    assert!(!TimestampGrammar::FilterStage.is_message_start("01/03/2023, 22:00 - Bob: long year"));
    assert!(TimestampGrammar::AggregationStage.is_message_start("01/03/2023, 22:00 - Bob: long year"));

    let stats = aggregate(filtered.as_str());
    assert_eq!(stats.message_count, 2);
    assert_eq!(stats.hourly.get(22), 1);
}

#[test]
fn test_single_digit_day_is_not_a_filter_boundary() {
    assert_eq!(parse_filter_date("1/3/23, 09:15 - Alice: hi"), None);
    assert!(parse_message_timestamp("1/3/23, 09:15 - Alice: hi").is_some());
}

#[test]
fn test_leading_whitespace_is_not_a_message_start() {
    assert_eq!(parse_filter_date(" 01/03/23, 09:15 - Alice: hi"), None);
    assert_eq!(parse_message_timestamp(" 01/03/23, 09:15 - Alice: hi"), None);
}

#[test]
fn test_range_across_new_year() {
    let text = "\
30/12/22, 10:00 - A: before
31/12/22, 23:59 - A: last of the year
01/01/23, 00:00 - A: first of the year
02/01/23, 10:00 - A: after
";
    let filtered = filter_transcript(text, &range("31/12/22", "01/01/23")).unwrap();
    assert_eq!(filtered.line_count(), 2);
}

#[test]
fn test_inverted_range_matches_nothing() {
    let inverted = range("05/03/23", "01/03/23");
    assert!(inverted.is_inverted());
    let err = filter_transcript("03/03/23, 10:00 - A: hi\n", &inverted).unwrap_err();
    assert!(err.is_no_content());
}

#[test]
fn test_empty_transcript_is_no_content() {
    let err = filter_transcript("", &range("01/03/23", "05/03/23")).unwrap_err();
    assert!(err.is_no_content());
}

#[test]
fn test_range_rejects_padded_bounds() {
    assert!(DateRange::parse(" 01/03/23", "05/03/23").unwrap_err().is_invalid_date());
    assert!(DateRange::parse("01/03/23", "05/03/23 \n").unwrap_err().is_invalid_date());
    assert!(DateRange::parse(" 01/03/23 ", "05/03/23").unwrap_err().is_invalid_date());
}

#[test]
fn test_range_rejects_impossible_dates() {
    assert!(DateRange::parse("30/02/23", "05/03/23").unwrap_err().is_invalid_date());
    assert!(DateRange::parse("01/03/23", "").unwrap_err().is_invalid_date());
}

// =========================================================================
// Aggregation-stage grammar
// =========================================================================

#[test]
fn test_meridiem_variants() {
    for line in [
        "3/3/2023, 9:05 PM - Bob: hey",
        "3/3/2023, 9:05 pm - Bob: hey",
        "3/3/2023, 9:05 p.m. - Bob: hey",
        "3/3/2023, 9:05 P.M. - Bob: hey",
        "3/3/2023, 9:05PM - Bob: hey",
    ] {
        let ts = parse_message_timestamp(line).unwrap_or_else(|| panic!("failed: {line}"));
        assert_eq!(ts.hour(), 21, "{line}");
    }

    let ts = parse_message_timestamp("3/3/23, 9:05 a.m. - Bob: hey").unwrap();
    assert_eq!(ts.hour(), 9);
}

#[test]
fn test_midnight_and_noon_in_twelve_hour_clock() {
    assert_eq!(parse_message_timestamp("3/3/23, 12:00 AM - A: x").unwrap().hour(), 0);
    assert_eq!(parse_message_timestamp("3/3/23, 12:00 PM - A: x").unwrap().hour(), 12);
}

#[test]
fn test_impossible_times_are_skipped() {
    assert_eq!(parse_message_timestamp("3/3/23, 13:00 PM - A: x"), None);
    assert_eq!(parse_message_timestamp("3/3/23, 24:00 - A: x"), None);
    assert_eq!(parse_message_timestamp("3/3/23, 9:75 - A: x"), None);
    assert_eq!(parse_message_timestamp("31/2/23, 9:00 - A: x"), None);
}

#[test]
fn test_three_digit_year_is_skipped() {
    assert_eq!(parse_message_timestamp("3/3/202, 9:05 - A: x"), None);
}

#[test]
fn test_separator_is_required() {
    assert_eq!(parse_message_timestamp("3/3/23, 9:05 A: x"), None);
    assert_eq!(parse_message_timestamp("3/3/23 9:05 - A: x"), None);
}

#[test]
fn test_day_comes_before_month() {
    let ts = parse_message_timestamp("3/4/2023, 9:05 - A: x").unwrap();
    assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2023, 4, 3).unwrap());
    assert_eq!(ts.weekday(), Weekday::Mon);
}

// =========================================================================
// Encoding fallback
// =========================================================================

#[test]
fn test_utf16_big_endian() {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in "01/03/23, 09:15 - Zoë: hi\n".encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    let transcript = decode_transcript(&bytes, Encoding::DEFAULT_ORDER).unwrap();
    assert_eq!(transcript.encoding(), Encoding::Utf16);
    assert_eq!(transcript.text(), "01/03/23, 09:15 - Zoë: hi\n");
}

#[test]
fn test_odd_length_utf16_falls_back_to_latin1() {
    let bytes = [0xFF, 0xFE, 0x41];
    let transcript = decode_transcript(&bytes, Encoding::DEFAULT_ORDER).unwrap();
    assert_eq!(transcript.encoding(), Encoding::Latin1);
    assert_eq!(transcript.text(), "ÿþA");
}

#[test]
fn test_no_candidates_is_undecodable() {
    let err = decode_transcript(b"hello", &[]).unwrap_err();
    assert!(err.is_undecodable());
}

#[test]
fn test_lone_carriage_returns_are_line_breaks() {
    let transcript =
        decode_transcript(b"01/03/23, 09:15 - A: hi\rsecond\r", Encoding::DEFAULT_ORDER).unwrap();
    assert_eq!(transcript.line_count(), 2);
    assert_eq!(transcript.text(), "01/03/23, 09:15 - A: hi\nsecond\n");
}

#[test]
fn test_empty_bytes_decode_to_empty_text() {
    let transcript = decode_transcript(b"", Encoding::DEFAULT_ORDER).unwrap();
    assert_eq!(transcript.encoding(), Encoding::Utf8);
    assert_eq!(transcript.line_count(), 0);
}
