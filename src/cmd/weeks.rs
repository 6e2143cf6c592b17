use crate::calc::{WeekAnchor, current_week_cutoff};
use crate::data::{AppSettings, HorizonConfig};
use anyhow::Result;
use chrono::NaiveDate;

pub fn run(today: NaiveDate) -> Result<()> {
    let settings = AppSettings::load()?;
    let weeks = HorizonConfig::load()?.anchors(today, settings.parse_policy)?;
    write_weeks(&weeks, current_week_cutoff(today), &mut std::io::stdout())
}

pub(crate) fn write_weeks<W: std::io::Write>(
    weeks: &[WeekAnchor],
    cutoff: NaiveDate,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Forecast Weeks (cutoff {})", cutoff.format("%Y-%m-%d"))?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<4} {:<12} {:<12} {}", "#", "Week", "Date", "Status")?;
    for (i, w) in weeks.iter().enumerate() {
        let status = if w.full_date < cutoff { "Frozen" } else { "Open" };
        writeln!(
            out,
            "  {:<4} {:<12} {:<12} {}",
            i + 1,
            w.display,
            w.full_date.format("%Y-%m-%d"),
            status
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} week(s)", weeks.len())?;
    Ok(())
}
