use crate::calc::{DistributionRequest, ParsePolicy};
use crate::calc::distribution::{distribute_strict, distribute_with};
use crate::data::{AppSettings, HorizonConfig};
use anyhow::Result;
use chrono::NaiveDate;

/// Arguments for an ad-hoc engine run.
#[derive(Debug, Clone)]
pub struct DistributeArgs {
    pub total: f64,
    pub start: String,
    pub end: String,
    pub existing: Vec<f64>,
    pub preserve_past: bool,
    pub strict: bool,
}

pub fn run(args: DistributeArgs, today: NaiveDate) -> Result<()> {
    let settings = AppSettings::load()?;
    let policy = resolve_policy(args.strict, &settings);
    let weeks = HorizonConfig::load()?.anchors(today, policy)?;
    let request = DistributionRequest {
        total_quantity: args.total,
        start_token: args.start,
        end_token: args.end,
        weeks,
        existing_values: args.existing,
        preserve_past: args.preserve_past,
    };
    let values = if args.strict {
        distribute_strict(&request, today)?
    } else {
        distribute_with(&request, today, settings.parse_policy)?
    };
    write_distribution(&request, &values, &mut std::io::stdout())
}

/// `--strict` overrides the configured policy for both the horizon and the range tokens.
pub(crate) fn resolve_policy(strict: bool, settings: &AppSettings) -> ParsePolicy {
    if strict {
        ParsePolicy::Strict
    } else {
        settings.parse_policy
    }
}

pub(crate) fn write_distribution<W: std::io::Write>(
    request: &DistributionRequest,
    values: &[f64],
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "Distribution of {} over [{} - {}]",
        request.total_quantity, request.start_token, request.end_token
    )?;
    writeln!(
        out,
        "Preserve past weeks: {}",
        if request.preserve_past { "Yes" } else { "No" }
    )?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<12} {:>10}", "Week", "Hours")?;
    for (week, value) in request.weeks.iter().zip(values) {
        writeln!(out, "  {:<12} {:>10}", week.display, value)?;
    }
    writeln!(out, "---")?;
    writeln!(out, "  {:<12} {:>10}", "Total:", values.iter().fold(0.0, |acc, v| acc + v))?;
    Ok(())
}
