use chrono::{Datelike, Days, NaiveDate};

/// The Monday that starts the next reporting week, or `today` if it is Monday.
///
/// Week anchors strictly before this date are frozen during allocation.
pub fn current_week_cutoff(today: NaiveDate) -> NaiveDate {
    let dow = today.weekday().num_days_from_sunday();
    let offset = (7 - dow + 1) % 7;
    today
        .checked_add_days(Days::new(u64::from(offset)))
        .unwrap_or(NaiveDate::MAX)
}
