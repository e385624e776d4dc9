//! Request validation
//!
//! Raw command-line values are checked here before anything touches the
//! network or the disk. A request that fails any check is rejected whole.

use chrono::NaiveDate;

use crate::data::{all_regions, catalog_listing, find_region};
use crate::dates::{days_between_dates, full_span, parse_date, EPOCH};
use crate::error::{Error, Result};
use crate::series::QueryWindow;

/// Unvalidated chart parameters as they arrive from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotArgs {
    /// Requested regions; empty means every region
    pub regions: Vec<String>,
    /// Exclusive upper bound date; `None` means today
    pub date: Option<String>,
    /// Number of most recent samples; `None` means the whole span
    pub last: Option<i64>,
    /// Chart the day-over-day change instead of the cumulative total
    pub derivative: bool,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub regions: Vec<&'static str>,
    pub cutoff: NaiveDate,
    pub window: QueryWindow,
    pub derivative: bool,
}

/// Checks raw arguments against the calendar, the sample span, and the
/// region catalog
///
/// # Errors
/// * `Error::Format` if the cutoff is not a `yyyy-mm-dd` date
/// * `Error::Range` if the cutoff is outside `[epoch, today]` or `last`
///   exceeds the number of days since the epoch
/// * `Error::InvalidSelection` if any region is not in the catalog; the
///   message lists every valid name
pub fn validate(args: &PlotArgs, today: NaiveDate) -> Result<PlotRequest> {
    let cutoff = match &args.date {
        Some(date) => parse_date(date)?,
        None => today,
    };

    if days_between_dates(cutoff, EPOCH) < 0 || days_between_dates(today, cutoff) < 0 {
        return Err(Error::Range(format!(
            "Invalid date {}: must be in the yyyy-mm-dd form with {} <= date <= {}",
            cutoff, EPOCH, today
        )));
    }

    let max_last = full_span(today);
    let last = args.last.unwrap_or(max_last);
    if !(0..=max_last).contains(&last) {
        return Err(Error::Range(format!(
            "Invalid last n-samples {}, n must be s.t. 0 <= n <= #days from day_0 (currently {})",
            last, max_last
        )));
    }

    let regions = resolve_regions(&args.regions)?;

    Ok(PlotRequest {
        regions,
        cutoff,
        window: QueryWindow {
            last: last as usize,
            max_last: max_last as usize,
        },
        derivative: args.derivative,
    })
}

fn resolve_regions(requested: &[String]) -> Result<Vec<&'static str>> {
    if requested.is_empty() {
        return Ok(all_regions().to_vec());
    }

    let invalid: Vec<String> = requested
        .iter()
        .filter(|name| find_region(name).is_none())
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(Error::InvalidSelection {
            invalid,
            valid: catalog_listing(),
        });
    }

    Ok(requested.iter().filter_map(|name| find_region(name)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, 10).unwrap()
    }

    fn args_with_date(date: &str) -> PlotArgs {
        PlotArgs {
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_cover_everything() {
        let request = validate(&PlotArgs::default(), today()).unwrap();
        assert_eq!(request.cutoff, today());
        assert_eq!(request.window, QueryWindow::full(15));
        assert_eq!(request.regions.len(), 21);
        assert!(!request.derivative);
    }

    #[test]
    fn test_malformed_date_is_format_error() {
        for date in ["2020/03/01", "2020-02-30", "yesterday"] {
            let err = validate(&args_with_date(date), today()).unwrap_err();
            assert!(matches!(err, Error::Format(_)), "{}: {:?}", date, err);
        }
    }

    #[test]
    fn test_date_before_epoch_is_range_error() {
        let err = validate(&args_with_date("2020-02-23"), today()).unwrap_err();
        assert!(matches!(err, Error::Range(_)));
    }

    #[test]
    fn test_date_after_today_is_range_error() {
        let err = validate(&args_with_date("2020-03-11"), today()).unwrap_err();
        assert!(matches!(err, Error::Range(_)));
    }

    #[test]
    fn test_boundary_dates_are_accepted() {
        assert_eq!(validate(&args_with_date("2020-02-24"), today()).unwrap().cutoff, EPOCH);
        assert_eq!(validate(&args_with_date("2020-03-10"), today()).unwrap().cutoff, today());
    }

    #[test]
    fn test_last_bounds() {
        let with_last = |last| PlotArgs {
            last: Some(last),
            ..Default::default()
        };

        assert_eq!(validate(&with_last(0), today()).unwrap().window.last, 0);
        assert_eq!(validate(&with_last(15), today()).unwrap().window.last, 15);

        let err = validate(&with_last(16), today()).unwrap_err();
        assert!(matches!(err, Error::Range(ref msg) if msg.contains("currently 15")));
        assert!(matches!(validate(&with_last(-1), today()), Err(Error::Range(_))));
    }

    #[test]
    fn test_unknown_regions_list_the_catalog() {
        for name in ["Toscana ", "Atlantis"] {
            let args = PlotArgs {
                regions: vec!["Lombardia".to_string(), name.to_string()],
                ..Default::default()
            };
            let err = validate(&args, today()).unwrap_err();
            match &err {
                Error::InvalidSelection { invalid, .. } => assert_eq!(invalid, &vec![name.to_string()]),
                other => panic!("unexpected error {:?}", other),
            }
            let msg = err.to_string();
            for region in all_regions() {
                assert!(msg.contains(region), "message misses {}", region);
            }
        }
    }

    #[test]
    fn test_selected_regions_keep_request_order() {
        let args = PlotArgs {
            regions: vec!["Veneto".to_string(), "Lombardia".to_string()],
            derivative: true,
            ..Default::default()
        };
        let request = validate(&args, today()).unwrap();
        assert_eq!(request.regions, vec!["Veneto", "Lombardia"]);
        assert!(request.derivative);
    }

    #[test]
    fn test_date_is_checked_before_regions() {
        let args = PlotArgs {
            regions: vec!["Atlantis".to_string()],
            date: Some("2019-12-31".to_string()),
            ..Default::default()
        };
        assert!(matches!(validate(&args, today()), Err(Error::Range(_))));
    }
}
