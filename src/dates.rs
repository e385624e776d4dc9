//! Date helpers over the fixed day-zero epoch
//!
//! Dates travel through the CLI as `YYYY-MM-DD` strings and through the
//! dataset as ISO-like timestamps; this module owns both conversions plus the
//! `Clock` used to decide what "today" is.

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Format used for every user-facing date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Day zero of the dataset: the first published bulletin
pub const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2020, 2, 24) {
    Some(date) => date,
    None => panic!("epoch is a valid calendar date"),
};

/// Source of the current wall-clock time
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Returns true if `s` is a valid `YYYY-MM-DD` calendar date
pub fn is_valid_date(s: &str) -> bool {
    parse_date(s).is_ok()
}

/// Parses a `YYYY-MM-DD` date string
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| Error::Format(format!("'{}' is not a yyyy-mm-dd date: {}", s, e)))
}

/// Signed number of days `d1 - d2`
///
/// Both arguments are `YYYY-MM-DD` strings; malformed components fail with
/// `Error::Format`.
pub fn days_between(d1: &str, d2: &str) -> Result<i64> {
    Ok(days_between_dates(parse_date(d1)?, parse_date(d2)?))
}

/// Signed number of days `d1 - d2` for already parsed dates
pub fn days_between_dates(d1: NaiveDate, d2: NaiveDate) -> i64 {
    (d1 - d2).num_days()
}

/// Returns the date portion of an ISO-8601-like timestamp
///
/// `"2020-02-24T18:00:00"` becomes `"2020-02-24"`.
pub fn truncate_to_date(timestamp: &str) -> Result<&str> {
    timestamp
        .split_once('T')
        .map(|(date, _)| date)
        .ok_or_else(|| Error::Format(format!("timestamp '{}' has no 'T' separator", timestamp)))
}

/// Number of daily samples between the epoch and `today`
pub fn full_span(today: NaiveDate) -> i64 {
    days_between_dates(today, EPOCH)
}
