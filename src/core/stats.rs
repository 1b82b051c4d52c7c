//! Hour-of-day and weekday activity histograms.
//!
//! [`aggregate`] re-reads a (usually already filtered) transcript with the
//! aggregation-stage timestamp grammar and counts every message by the hour
//! and the weekday it was sent. Lines without a parseable timestamp are
//! skipped; aggregation itself never fails.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::core::stats::aggregate;
//! use chrono::Weekday;
//!
//! let stats = aggregate("\
//! 01/03/23, 09:15 - Alice: hi
//! 3/3/2023, 9:05 PM - Bob: hey
//! not a message start
//! ");
//!
//! assert_eq!(stats.message_count, 2);
//! assert_eq!(stats.hourly.get(9), 1);
//! assert_eq!(stats.hourly.get(21), 1);
//! assert_eq!(stats.weekday.get(Weekday::Wed), 1);
//! assert_eq!(stats.weekday.get(Weekday::Fri), 1);
//! ```

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::parsing::{TimestampGrammar, parse_message_timestamp};

/// Message counts per hour of day, `0..=23`. Every hour is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct HourHistogram {
    counts: [u64; 24],
}

impl HourHistogram {
    /// Count for `hour`. Hours outside `0..=23` have no messages.
    pub fn get(&self, hour: u32) -> u64 {
        self.counts.get(hour as usize).copied().unwrap_or(0)
    }

    /// `(hour, count)` pairs for all 24 hours.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        (0u32..).zip(self.counts.iter().copied())
    }

    pub fn counts(&self) -> &[u64; 24] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The busiest hour, earliest one on ties. `None` when empty.
    pub fn peak(&self) -> Option<(u32, u64)> {
        peak(self.iter())
    }

    fn record(&mut self, timestamp: &NaiveDateTime) {
        self.counts[timestamp.hour() as usize] += 1;
    }
}

/// Message counts per weekday, Monday first. Every day is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct WeekdayHistogram {
    counts: [u64; 7],
}

impl WeekdayHistogram {
    /// Axis labels, Monday first.
    pub const LABELS: [&'static str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    pub fn get(&self, day: Weekday) -> u64 {
        self.counts[day.num_days_from_monday() as usize]
    }

    /// `(weekday, count)` pairs, Monday to Sunday.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, u64)> + '_ {
        std::iter::successors(Some(Weekday::Mon), |day| Some(day.succ()))
            .zip(self.counts.iter().copied())
    }

    /// Counts indexed Monday = 0 … Sunday = 6.
    pub fn counts(&self) -> &[u64; 7] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// The busiest weekday, earliest in the week on ties. `None` when empty.
    pub fn peak(&self) -> Option<(Weekday, u64)> {
        peak(self.iter())
    }

    /// English name of `day`.
    pub fn label(day: Weekday) -> &'static str {
        Self::LABELS[day.num_days_from_monday() as usize]
    }

    fn record(&mut self, timestamp: &NaiveDateTime) {
        self.counts[timestamp.weekday().num_days_from_monday() as usize] += 1;
    }
}

fn peak<K>(buckets: impl Iterator<Item = (K, u64)>) -> Option<(K, u64)> {
    buckets
        .filter(|&(_, count)| count > 0)
        .fold(None, |best, (key, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((key, count)),
        })
}

/// Both activity histograms of a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActivityStats {
    pub hourly: HourHistogram,
    pub weekday: WeekdayHistogram,
    /// Number of lines that carried a parseable timestamp.
    pub message_count: u64,
}

impl ActivityStats {
    /// Returns `true` if no timestamp was counted.
    pub fn is_empty(&self) -> bool {
        self.message_count == 0
    }

    /// Adds one message sent at `timestamp`.
    pub fn record(&mut self, timestamp: &NaiveDateTime) {
        self.hourly.record(timestamp);
        self.weekday.record(timestamp);
        self.message_count += 1;
    }
}

impl FromIterator<NaiveDateTime> for ActivityStats {
    fn from_iter<I: IntoIterator<Item = NaiveDateTime>>(iter: I) -> Self {
        let mut stats = ActivityStats::default();
        for timestamp in iter {
            stats.record(&timestamp);
        }
        stats
    }
}

/// Counts every timestamped line of `text` by hour and weekday.
pub fn aggregate(text: &str) -> ActivityStats {
    let stats: ActivityStats = text.lines().filter_map(parse_message_timestamp).collect();
    debug!(
        messages = stats.message_count,
        pattern = TimestampGrammar::AggregationStage.pattern(),
        "aggregated activity"
    );
    stats
}
