//! Spreads a to-go quantity across weekly buckets in proportion to working
//! days, leaving weeks before the reporting cutoff frozen at their stored
//! values.

use crate::calc::cutoff::current_week_cutoff;
use crate::calc::date_token::{ParsePolicy, parse_date_token};
use crate::calc::weeks::WeekAnchor;
use crate::calc::workday::{count_working_days, count_working_days_in_week};
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DistributionRequest {
    pub total_quantity: f64,
    pub start_token: String,
    pub end_token: String,
    pub weeks: Vec<WeekAnchor>,
    /// Previously stored value per week, positionally matched to `weeks`.
    /// May be shorter than `weeks`; missing entries are treated as absent.
    pub existing_values: Vec<f64>,
    pub preserve_past: bool,
}

/// Nearest integer with halves rounded toward positive infinity (2.5 -> 3, -2.5 -> -2).
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Lenient distribution: bad tokens fall back to `today`, never fails.
pub fn distribute(request: &DistributionRequest, today: NaiveDate) -> Vec<f64> {
    let start = parse_date_token(&request.start_token, today);
    let end = parse_date_token(&request.end_token, today);
    allocate(request, start, end, current_week_cutoff(today))
}

/// Strict distribution: bad tokens are reported instead of replaced.
pub fn distribute_strict(request: &DistributionRequest, today: NaiveDate) -> Result<Vec<f64>> {
    distribute_with(request, today, ParsePolicy::Strict)
}

/// Distribution with date tokens parsed under `policy`.
pub fn distribute_with(
    request: &DistributionRequest,
    today: NaiveDate,
    policy: ParsePolicy,
) -> Result<Vec<f64>> {
    let start = policy.parse(&request.start_token, today)?;
    let end = policy.parse(&request.end_token, today)?;
    Ok(allocate(request, start, end, current_week_cutoff(today)))
}

/// Allocation over already-resolved dates.
pub fn allocate(
    request: &DistributionRequest,
    start: NaiveDate,
    end: NaiveDate,
    cutoff: NaiveDate,
) -> Vec<f64> {
    let existing = |i: usize| request.existing_values.get(i).copied();

    let effective_start = if request.preserve_past && start < cutoff {
        cutoff
    } else {
        start
    };
    let total_working_days = count_working_days(effective_start, end);

    debug!(
        %start, %end, %cutoff, %effective_start, total_working_days,
        preserve_past = request.preserve_past,
        "allocating {} across {} weeks",
        request.total_quantity,
        request.weeks.len()
    );

    if total_working_days == 0 {
        return (0..request.weeks.len())
            .map(|i| existing(i).unwrap_or(0.0))
            .collect();
    }

    let daily_rate = request.total_quantity / f64::from(total_working_days);

    request
        .weeks
        .iter()
        .enumerate()
        .map(|(i, week)| match existing(i) {
            Some(value) if request.preserve_past && week.full_date < cutoff => value,
            _ => {
                let days = count_working_days_in_week(week.full_date, effective_start, end);
                round_half_up(daily_rate * f64::from(days))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::date_token::format_date_token;
    use crate::calc::weeks::generate_week_anchors;
    use crate::calc::workday::week_window;
    use crate::error::ForecastError;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn request(
        total: f64,
        start: &str,
        end: &str,
        weeks: Vec<WeekAnchor>,
        existing: Vec<f64>,
        preserve_past: bool,
    ) -> DistributionRequest {
        DistributionRequest {
            total_quantity: total,
            start_token: start.to_string(),
            end_token: end.to_string(),
            weeks,
            existing_values: existing,
            preserve_past,
        }
    }

    fn two_weeks() -> Vec<WeekAnchor> {
        vec![WeekAnchor::new(d(2025, 8, 4)), WeekAnchor::new(d(2025, 8, 11))]
    }

    #[test]
    fn test_round_half_up_boundaries() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.0), 0.0);
    }

    #[test]
    fn test_two_full_weeks_without_preserve() {
        let req = request(100.0, "04-Aug-25", "15-Aug-25", two_weeks(), vec![], false);
        let out = distribute(&req, d(2025, 8, 6));
        assert_eq!(out, vec![50.0, 50.0]);
    }

    #[test]
    fn test_preserve_freezes_past_week_and_respreads_future() {
        // today inside the Aug-04 week, cutoff = Mon Aug 11
        let req = request(100.0, "04-Aug-25", "15-Aug-25", two_weeks(), vec![42.0, 0.0], true);
        let out = distribute(&req, d(2025, 8, 6));
        assert_eq!(out, vec![42.0, 100.0]);
    }

    #[test]
    fn test_preserve_without_existing_value_recomputes_past_week() {
        // No stored value for the past week: it is recomputed against the
        // effective start and gets nothing.
        let req = request(100.0, "04-Aug-25", "15-Aug-25", two_weeks(), vec![], true);
        let out = distribute(&req, d(2025, 8, 6));
        assert_eq!(out, vec![0.0, 100.0]);
    }

    #[test]
    fn test_preserve_when_start_after_cutoff_is_unchanged() {
        let req = request(100.0, "04-Aug-25", "15-Aug-25", two_weeks(), vec![7.0, 7.0], true);
        let out = distribute(&req, d(2025, 7, 30));
        assert_eq!(out, vec![50.0, 50.0]);
    }

    #[test]
    fn test_monday_today_does_not_freeze_current_week() {
        // On Monday Aug 4 the cutoff is Aug 4 itself, so the Aug-04 week is open.
        let req = request(100.0, "04-Aug-25", "15-Aug-25", two_weeks(), vec![42.0, 0.0], true);
        let out = distribute(&req, d(2025, 8, 4));
        assert_eq!(out, vec![50.0, 50.0]);
    }

    #[test]
    fn test_saturday_only_range_passes_through() {
        let req = request(100.0, "09-Aug-25", "09-Aug-25", two_weeks(), vec![], false);
        assert_eq!(distribute(&req, d(2025, 8, 1)), vec![0.0, 0.0]);

        let req = request(100.0, "09-Aug-25", "09-Aug-25", two_weeks(), vec![3.0, 4.0], false);
        assert_eq!(distribute(&req, d(2025, 8, 1)), vec![3.0, 4.0]);
    }

    #[test]
    fn test_zero_days_pass_through_fills_missing_with_zero() {
        let req = request(100.0, "09-Aug-25", "10-Aug-25", two_weeks(), vec![5.0], false);
        assert_eq!(distribute(&req, d(2025, 8, 1)), vec![5.0, 0.0]);
    }

    #[test]
    fn test_inverted_range_passes_through() {
        let req = request(100.0, "15-Aug-25", "04-Aug-25", two_weeks(), vec![1.0, 2.0], false);
        assert_eq!(distribute(&req, d(2025, 8, 1)), vec![1.0, 2.0]);
    }

    #[test]
    fn test_range_entirely_in_past_with_preserve_keeps_existing() {
        let weeks = generate_week_anchors(d(2025, 7, 7), 3);
        let req = request(90.0, "07-Jul-25", "25-Jul-25", weeks, vec![10.0, 20.0, 30.0], true);
        assert_eq!(distribute(&req, d(2025, 8, 6)), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_rounding_per_week() {
        // 3 working days Wed..Fri, 10/3 per day: week gets round(10) = 10
        let weeks = vec![WeekAnchor::new(d(2025, 8, 4))];
        let req = request(10.0, "06-Aug-25", "08-Aug-25", weeks, vec![], false);
        assert_eq!(distribute(&req, d(2025, 8, 1)), vec![10.0]);

        // 100 over 15 days: weeks of 5 get round(33.33) = 33 each
        let weeks = generate_week_anchors(d(2025, 8, 4), 3);
        let req = request(100.0, "04-Aug-25", "22-Aug-25", weeks, vec![], false);
        assert_eq!(distribute(&req, d(2025, 8, 1)), vec![33.0, 33.0, 33.0]);
    }

    #[test]
    fn test_half_rounds_up_in_allocation() {
        // 5 over 2 days: 2.5 per day, single-day week rounds 2.5 -> 3
        let weeks = vec![WeekAnchor::new(d(2025, 8, 4)), WeekAnchor::new(d(2025, 8, 11))];
        let req = request(5.0, "08-Aug-25", "11-Aug-25", weeks, vec![], false);
        assert_eq!(distribute(&req, d(2025, 8, 1)), vec![3.0, 3.0]);
    }

    #[test]
    fn test_weeks_outside_range_get_zero() {
        let weeks = generate_week_anchors(d(2025, 7, 28), 4);
        let req = request(100.0, "04-Aug-25", "15-Aug-25", weeks, vec![], false);
        assert_eq!(distribute(&req, d(2025, 7, 1)), vec![0.0, 50.0, 50.0, 0.0]);
    }

    #[test]
    fn test_lenient_bad_start_token_uses_today() {
        // Start falls back to today (Mon Aug 11), so only the second week is covered.
        let req = request(100.0, "bogus", "15-Aug-25", two_weeks(), vec![], false);
        assert_eq!(distribute(&req, d(2025, 8, 11)), vec![0.0, 100.0]);
    }

    #[test]
    fn test_strict_reports_bad_token() {
        let req = request(100.0, "bogus", "15-Aug-25", two_weeks(), vec![], false);
        assert_eq!(
            distribute_strict(&req, d(2025, 8, 11)),
            Err(ForecastError::InvalidDateToken("bogus".to_string()))
        );
    }

    #[test]
    fn test_strict_matches_lenient_on_valid_input() {
        let req = request(100.0, "04-Aug-25", "15-Aug-25", two_weeks(), vec![42.0], true);
        let today = d(2025, 8, 6);
        assert_eq!(distribute_strict(&req, today).unwrap(), distribute(&req, today));
    }

    #[test]
    fn test_anchors_at_date_limits_get_zero() {
        let weeks = vec![WeekAnchor::new(NaiveDate::MAX), WeekAnchor::new(NaiveDate::MIN)];
        let req = request(100.0, "04-Aug-25", "15-Aug-25", weeks, vec![], false);
        assert_eq!(distribute(&req, d(2025, 8, 6)), vec![0.0, 0.0]);
    }

    #[test]
    fn test_today_at_max_date_passes_through() {
        let weeks = vec![WeekAnchor::new(NaiveDate::MAX)];
        let req = request(100.0, "04-Aug-25", "15-Aug-25", weeks, vec![7.0], true);
        assert_eq!(distribute(&req, NaiveDate::MAX), vec![7.0]);
    }

    #[test]
    fn test_empty_weeks_yield_empty_result() {
        let req = request(100.0, "04-Aug-25", "15-Aug-25", vec![], vec![], false);
        assert!(distribute(&req, d(2025, 8, 1)).is_empty());
    }

    proptest! {
        #[test]
        fn prop_conservation_without_preserve(
            start_off in 0i64..400,
            len in 0i64..90,
            total in 0u32..10_000,
        ) {
            let start = d(2025, 1, 1) + chrono::Duration::days(start_off);
            let end = start + chrono::Duration::days(len);
            let (first_monday, _) = week_window(start);
            let count = ((end - first_monday).num_days() / 7 + 1) as usize;
            let weeks = generate_week_anchors(first_monday, count);
            let req = request(
                f64::from(total),
                &format_date_token(start),
                &format_date_token(end),
                weeks,
                vec![],
                false,
            );
            let out = distribute(&req, d(2020, 1, 1));
            prop_assert_eq!(out.len(), count);
            if count_working_days(start, end) > 0 {
                let sum: f64 = out.iter().sum();
                prop_assert!((sum - f64::from(total)).abs() <= count as f64);
            }
        }

        #[test]
        fn prop_freeze_idempotent_when_all_weeks_past(
            values in proptest::collection::vec(0u32..500, 1..10),
            total in 0u32..5_000,
        ) {
            let existing: Vec<f64> = values.iter().map(|v| f64::from(*v)).collect();
            let weeks = generate_week_anchors(d(2025, 1, 6), existing.len());
            let today = d(2025, 6, 4);
            let req = request(f64::from(total), "06-Jan-25", "30-Jul-25", weeks, existing.clone(), true);
            let first = distribute(&req, today);
            prop_assert_eq!(&first, &existing);
            let again = request(f64::from(total), "06-Jan-25", "30-Jul-25", req.weeks.clone(), first, true);
            prop_assert_eq!(distribute(&again, today), existing);
        }
    }
}
