//! Time handling for image requests.
//!
//! The API takes naive timestamps with second precision and no zone suffix.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::TimeParseError;

/// Format of the `starttime` query value and of batch result keys.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Render a timestamp the way the API expects it.
pub fn format_time(time: &NaiveDateTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse a user supplied timestamp.
///
/// Accepts RFC 3339 (converted to UTC and stripped of its offset),
/// `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` and a bare date (midnight).
pub fn parse_time(s: &str) -> Result<NaiveDateTime, TimeParseError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, TIME_FORMAT) {
        return Ok(ndt);
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(ndt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(ndt);
        }
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whole seconds from start to end; negative when end precedes start.
    pub fn total_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, time: &NaiveDateTime) -> bool {
        time >= &self.start && time < &self.end
    }

    /// Instants from `start` advancing by `step`, stopping before `end`.
    ///
    /// Yields nothing for a non-positive step.
    pub fn iter_step(&self, step: Duration) -> impl Iterator<Item = NaiveDateTime> {
        let end = self.end;
        let mut next = (step > Duration::zero()).then_some(self.start);
        std::iter::from_fn(move || {
            let current = next.filter(|t| *t < end)?;
            next = current.checked_add_signed(step);
            Some(current)
        })
    }
}
