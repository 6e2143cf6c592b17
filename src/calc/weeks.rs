use crate::calc::date_token::format_date_token;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One forecasting week, identified by its first day.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WeekAnchor {
    pub display: String,
    pub full_date: NaiveDate,
}

impl WeekAnchor {
    pub fn new(full_date: NaiveDate) -> Self {
        WeekAnchor {
            display: format_date_token(full_date),
            full_date,
        }
    }
}

/// `count` anchors starting at `first`, 7 days apart.
pub fn generate_week_anchors(first: NaiveDate, count: usize) -> Vec<WeekAnchor> {
    (0..count as u64)
        .filter_map(|i| first.checked_add_days(Days::new(i * 7)))
        .map(WeekAnchor::new)
        .collect()
}
