use crate::cmd::show::{GridView, write_grid};
use crate::data::{AppSettings, ForecastData, HorizonConfig, Persistable};
use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

/// Recalculates every forecast line and saves the new snapshot unless `dry_run`.
pub fn run(dry_run: bool, today: NaiveDate) -> Result<()> {
    let settings = AppSettings::load()?;
    let weeks = HorizonConfig::load()?.anchors(today, settings.parse_policy)?;
    let mut data = ForecastData::load()?;

    let changed = data.recalculate_all(&weeks, today, &settings)?;
    info!(changed, lines = data.lines.len(), %today, "recalculated forecast");

    let mut out = std::io::stdout();
    write_grid(&data, &weeks, GridView::Hours, &mut out)?;
    write_summary(&data, changed, dry_run, &mut out)?;

    if !dry_run {
        data.save()?;
    }
    Ok(())
}

pub(crate) fn write_summary<W: std::io::Write>(
    data: &ForecastData,
    changed: usize,
    dry_run: bool,
    out: &mut W,
) -> Result<()> {
    let total = data.lines.iter().fold(0.0, |acc, l| acc + l.total_hours());
    writeln!(out, "Changed: {} line(s)", changed)?;
    writeln!(out, "Allocated: {} hours", total)?;
    if dry_run {
        writeln!(out, "Dry run: forecast not saved.")?;
    } else {
        writeln!(out, "Forecast saved.")?;
    }
    Ok(())
}
