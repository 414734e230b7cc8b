//! Explicit stay-date parsing and month bucketing.
//!
//! Input dates are `DD-MM-YYYY` (`STAY_DATE_FORMAT`); bucket keys are `YYYY-MM`
//! (`YEAR_MONTH_FORMAT`). No segment reordering happens anywhere else.

use chrono::{Datelike, NaiveDate};

use crate::constants::dates::{STAY_DATE_FORMAT, YEAR_MONTH_FORMAT};
use crate::types::YearMonth;

/// Parse a `DD-MM-YYYY` stay date. Surrounding whitespace is ignored.
///
/// Returns `None` for any other layout or an out-of-range day/month.
pub fn parse_stay_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), STAY_DATE_FORMAT).ok()
}

/// Truncate a date to its `(year, month)` pair, which orders chronologically.
pub fn month_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Format a `(year, month)` pair as a `YYYY-MM` bucket key.
pub fn year_month_key(year: i32, month: u32) -> YearMonth {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first.format(YEAR_MONTH_FORMAT).to_string(),
        None => format!("{year:04}-{month:02}"),
    }
}
