//! Reporting window: the UTC day before the run

#![warn(clippy::all, rust_2018_idioms)]

use chrono::{DateTime, Duration, NaiveTime, Utc};
use std::path::PathBuf;

use crate::app::data_plane::cloudtrail_events::LookupOptions;

/// Half-open `[start, end)` span of one UTC day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The 24 hours ending at the most recent UTC midnight at or before `now`
    pub fn day_before(now: DateTime<Utc>) -> Self {
        let end = now
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();
        Self {
            start: end - Duration::days(1),
            end,
        }
    }

    /// Window for a run starting right now
    pub fn yesterday() -> Self {
        Self::day_before(Utc::now())
    }

    /// Lookup options restricted to this window
    pub fn lookup_options(&self) -> LookupOptions {
        LookupOptions::new()
            .with_start_time(self.start.timestamp_millis())
            .with_end_time(self.end.timestamp_millis())
    }

    /// `combined_user_logs_<YYYY-MM-DD>.xlsx`, dated by the reported day
    pub fn default_output_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "combined_user_logs_{}.xlsx",
            self.start.format("%Y-%m-%d")
        ))
    }
}
