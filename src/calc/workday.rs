use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Returns true for Monday–Friday, false for Saturday/Sunday.
pub fn is_workday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts weekdays in [start, end] inclusive. An inverted range is empty.
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_workday(*d))
        .count() as u32
}

/// Monday and Friday of the week containing `anchor` (weeks start on Monday).
/// Clamped to the representable date range at either end.
pub fn week_window(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = anchor
        .checked_sub_days(Days::new(u64::from(anchor.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN);
    let friday = monday
        .checked_add_days(Days::new(4))
        .unwrap_or(NaiveDate::MAX);
    (monday, friday)
}

/// Weekdays shared by [range_start, range_end] and the Mon–Fri week of `anchor`.
pub fn count_working_days_in_week(
    anchor: NaiveDate,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> u32 {
    let (monday, friday) = week_window(anchor);
    let overlap_start = range_start.max(monday);
    let overlap_end = range_end.min(friday);
    if overlap_start > overlap_end {
        return 0;
    }
    count_working_days(overlap_start, overlap_end)
}
