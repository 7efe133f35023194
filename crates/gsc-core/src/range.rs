//! Date range normalization
//!
//! Turns explicit dates, ISO strings or relative offsets into a range the
//! API accepts. Everything here is pure: the current date is an argument.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::enums::DataState;
use crate::error::{GscError, Result};

/// Months of history the API retains
pub const RETENTION_MONTHS: u32 = 16;

/// Inclusive `[start, end]` pair with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// An empty string means `today`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use gsc_core::range::parse_date;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// assert_eq!(parse_date("2022-11-10", today).unwrap(), NaiveDate::from_ymd_opt(2022, 11, 10).unwrap());
/// assert_eq!(parse_date("", today).unwrap(), today);
/// assert!(parse_date("10/11/2022", today).is_err());
/// ```
pub fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| GscError::InvalidDateFormat(raw.to_string()))
}

/// Earliest start date the API serves: 16 months and one day before `today`.
pub fn retention_floor(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(RETENTION_MONTHS))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(NaiveDate::MIN)
}

/// Shift `start` by `months` then `days`.
///
/// Month arithmetic clamps to the last day of the target month
/// (Jan 31 + 1 month = Feb 28/29). When `days + months` is negative the
/// two dates are swapped so the earlier one comes first.
pub fn offset(start: NaiveDate, days: i32, months: i32) -> Result<DateRange> {
    let out_of_range = || {
        GscError::InvalidArgumentType(format!(
            "{} shifted by {} months and {} days is out of range",
            start, months, days
        ))
    };

    let shifted = if months >= 0 {
        start.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        start.checked_sub_months(Months::new(months.unsigned_abs()))
    }
    .ok_or_else(out_of_range)?;

    let end = if days >= 0 {
        shifted.checked_add_days(Days::new(u64::from(days.unsigned_abs())))
    } else {
        shifted.checked_sub_days(Days::new(u64::from(days.unsigned_abs())))
    }
    .ok_or_else(out_of_range)?;

    if i64::from(days) + i64::from(months) < 0 {
        Ok(DateRange { start: end, end: start })
    } else {
        Ok(DateRange { start, end })
    }
}

/// Apply the API's constraints to a raw `[start, end]` pair.
///
/// - with `DataState::Final`, any bound on or after `today` becomes yesterday
/// - `start` is raised to [`retention_floor`]
/// - the pair is swapped if still out of order
pub fn normalize(
    start: NaiveDate,
    end: NaiveDate,
    data_state: DataState,
    today: NaiveDate,
) -> DateRange {
    let mut start = start;
    let mut end = end;

    if data_state == DataState::Final {
        let yesterday = today.pred_opt().unwrap_or(today);
        if start >= today {
            start = yesterday;
        }
        if end >= today {
            end = yesterday;
        }
    }

    let floor = retention_floor(today);
    if start < floor {
        start = floor;
    }

    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    DateRange { start, end }
}

/// [`offset`] followed by [`normalize`].
pub fn normalize_relative(
    start: NaiveDate,
    days: i32,
    months: i32,
    data_state: DataState,
    today: NaiveDate,
) -> Result<DateRange> {
    let raw = offset(start, days, months)?;
    Ok(normalize(raw.start, raw.end, data_state, today))
}
