//! UTC-safe calendar arithmetic for block planning.
//!
//! All block math works on whole UTC days. Month arithmetic clamps the
//! day-of-month, so a block anchored on Jan 31 ends on Feb 28 (or 29), never
//! on Mar 3.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};

/// Advance `date` by whole months, clamping the day-of-month to the length of
/// the target month.
///
/// Returns `None` only when the result would leave chrono's supported range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Parse a `YYYY-MM-DD` date-only string into a UTC day.
///
/// Lenient: malformed input (wrong shape, zero or out-of-range components,
/// trailing garbage) yields `None` rather than an error. Callers treat `None`
/// as "no override given".
pub fn parse_start_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .filter(|day| day.year() > 0)
}

/// Truncate a timestamp to its UTC calendar day.
pub fn utc_day(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}

/// UTC midnight instant of a calendar day.
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Number of days in a calendar month, or 0 when the month is out of range.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => {
            u32::try_from(next.signed_duration_since(first).num_days()).unwrap_or(0)
        }
        _ => 0,
    }
}
