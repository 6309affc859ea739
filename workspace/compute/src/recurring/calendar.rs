use chrono::{Datelike, Months, NaiveDate};

/// Returns the number of days in the given month using chrono.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = next_month(year, month);
    let first_day_next_month = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    // Go back one day to get the last day of the current month
    first_day_next_month.pred_opt().map(|d| d.day())
}

/// The (year, month) following the given one.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 { (year + 1, 1) } else { (year, month + 1) }
}

/// Builds `year-month-day`, clamping `day` to the last day of the month.
///
/// Day 31 in April yields April 30th, day 30 in February yields the 28th
/// (29th in leap years). Returns `None` only for an invalid month or a year
/// outside chrono's range.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let last = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))
}

/// `start` shifted by `months` calendar months, clamped at month end.
/// Always computed from `start`, so a 31st never drifts to the 28th.
pub fn add_months(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(months))
}
