//! Aggregate statistics over a client's history

use super::SubmissionRecord;
use crate::core::analysis::Severity;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Days covered by the timeline, ending today
const TIMELINE_DAYS: i64 = 7;

/// Counts per severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl SeverityCounts {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
        }
    }
}

/// Submissions on one UTC day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineDay {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: u64,
    /// `Today`, `Yesterday` or the short weekday name
    pub label: String,
}

/// History statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total: u64,
    pub languages: BTreeMap<String, u64>,
    pub severity: SeverityCounts,
    pub categories: BTreeMap<String, u64>,
    pub timeline: Vec<TimelineDay>,
}

impl HistoryStats {
    /// Zeroed stats with an empty timeline (history unavailable)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stats over `entries` with a 7-day timeline ending on `today`
    pub fn compute(entries: &[SubmissionRecord], today: NaiveDate) -> Self {
        let mut stats = Self {
            total: entries.len() as u64,
            ..Self::default()
        };

        let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for entry in entries {
            *stats.languages.entry(entry.language.clone()).or_default() += 1;
            *stats.categories.entry(entry.category.clone()).or_default() += 1;
            stats.severity.record(entry.severity);
            *per_day.entry(entry.created_at.date_naive()).or_default() += 1;
        }

        stats.timeline = (0..TIMELINE_DAYS)
            .rev()
            .map(|days_ago| {
                let date = today - Duration::days(days_ago);
                TimelineDay {
                    date: date.format("%Y-%m-%d").to_string(),
                    count: per_day.get(&date).copied().unwrap_or(0),
                    label: day_label(days_ago, date.weekday()),
                }
            })
            .collect();

        stats
    }
}

fn day_label(days_ago: i64, weekday: Weekday) -> String {
    match days_ago {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        _ => weekday.to_string(),
    }
}
