//! Cache freshness decision
//!
//! The stamp records the calendar date and hour of the last successful
//! download. A cache is fresh only for the rest of the hour it was fetched in.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::error::Error;

/// Date and hour of the last successful fetch, encoded as `YYYY-MM-DD-HH`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStamp {
    pub date: NaiveDate,
    pub hour: u32,
}

impl CacheStamp {
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self {
            date: at.date(),
            hour: at.hour(),
        }
    }
}

impl fmt::Display for CacheStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.date.format("%Y-%m-%d"), self.hour)
    }
}

impl FromStr for CacheStamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::Format(format!("cache stamp '{}' is not yyyy-mm-dd-hh", s));

        let parts: Vec<&str> = s.trim().split('-').collect();
        let [year, month, day, hour] = parts.as_slice() else {
            return Err(malformed());
        };

        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        let day: u32 = day.parse().map_err(|_| malformed())?;
        let hour: u32 = hour.parse().map_err(|_| malformed())?;

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)?;
        if hour > 23 {
            return Err(malformed());
        }

        Ok(Self { date, hour })
    }
}

/// Decides whether the cached dataset must be downloaded again
///
/// Fresh only when a stamp exists, it is dated today, and the current hour
/// does not exceed the stamped hour. `force` always means stale.
pub fn is_stale(stamp: Option<CacheStamp>, now: NaiveDateTime, force: bool) -> bool {
    if force {
        return true;
    }
    match stamp {
        None => true,
        Some(stamp) => stamp.date != now.date() || now.hour() > stamp.hour,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(hour, 15, 0).unwrap())
    }

    fn stamp(y: i32, m: u32, d: u32, hour: u32) -> CacheStamp {
        CacheStamp::from_datetime(at(y, m, d, hour))
    }

    #[test]
    fn test_missing_stamp_is_stale() {
        assert!(is_stale(None, at(2020, 3, 10, 12), false));
    }

    #[test]
    fn test_yesterday_stamp_is_stale() {
        assert!(is_stale(Some(stamp(2020, 3, 9, 23)), at(2020, 3, 10, 0), false));
    }

    #[test]
    fn test_same_hour_today_is_fresh() {
        assert!(!is_stale(Some(stamp(2020, 3, 10, 12)), at(2020, 3, 10, 12), false));
    }

    #[test]
    fn test_stamp_hour_ahead_of_now_is_fresh() {
        assert!(!is_stale(Some(stamp(2020, 3, 10, 14)), at(2020, 3, 10, 12), false));
    }

    #[test]
    fn test_later_hour_today_is_stale() {
        assert!(is_stale(Some(stamp(2020, 3, 10, 12)), at(2020, 3, 10, 13), false));
    }

    #[test]
    fn test_future_dated_stamp_is_stale() {
        assert!(is_stale(Some(stamp(2020, 3, 11, 0)), at(2020, 3, 10, 12), false));
    }

    #[test]
    fn test_force_is_always_stale() {
        let now = at(2020, 3, 10, 12);
        assert!(is_stale(Some(stamp(2020, 3, 10, 12)), now, true));
        assert!(is_stale(None, now, true));
    }

    #[test]
    fn test_stamp_display_pads_hour() {
        assert_eq!(stamp(2020, 3, 10, 7).to_string(), "2020-03-10-07");
    }

    #[test]
    fn test_stamp_parses_unpadded_hour() {
        let parsed: CacheStamp = "2020-03-10-7".parse().unwrap();
        assert_eq!(parsed, stamp(2020, 3, 10, 7));
        let parsed: CacheStamp = "2020-03-10-17\n".parse().unwrap();
        assert_eq!(parsed.hour, 17);
    }

    #[test]
    fn test_stamp_rejects_malformed_input() {
        for input in ["", "2020-03-10", "2020-03-10-25", "2020-02-30-01", "a-b-c-d", "2020-03-10-01-00"] {
            assert!(input.parse::<CacheStamp>().is_err(), "accepted {:?}", input);
        }
    }
}
