use crate::calc::{Variance, VarianceKind, WeekAnchor, variance};
use crate::data::{AppSettings, ForecastData, ForecastLine, HorizonConfig, Persistable};
use anyhow::{Result, bail};
use chrono::NaiveDate;

/// Original-vs-updated comparison for one forecast line.
#[derive(Debug, Clone)]
pub struct LineVariance {
    pub id: String,
    pub craft: String,
    pub original: Vec<f64>,
    pub updated: Vec<f64>,
    pub variance: Vec<Variance>,
}

impl LineVariance {
    pub fn total(&self) -> f64 {
        self.variance.iter().fold(0.0, |acc, v| acc + v.value)
    }
}

/// Baseline (no freezing) minus the updated allocation under `settings`.
pub fn line_variance(
    line: &ForecastLine,
    weeks: &[WeekAnchor],
    today: NaiveDate,
    settings: &AppSettings,
) -> Result<LineVariance> {
    let original = line.original_baseline(weeks, today);
    let mut updated_line = line.clone();
    let updated = updated_line.recalculate(weeks, today, settings)?.to_vec();
    Ok(LineVariance {
        id: line.id.clone(),
        craft: line.craft.clone(),
        variance: variance(&original, &updated),
        original,
        updated,
    })
}

pub fn run(id: Option<&str>, today: NaiveDate) -> Result<()> {
    let settings = AppSettings::load()?;
    let weeks = HorizonConfig::load()?.anchors(today, settings.parse_policy)?;
    let data = ForecastData::load()?;

    let lines: Vec<&ForecastLine> = match id {
        Some(id) => match data.get_line_by_id(id) {
            Some(line) => vec![line],
            None => bail!("Forecast line '{}' not found.", id),
        },
        None => data.lines.iter().collect(),
    };

    let mut out = std::io::stdout();
    for line in lines {
        let report = line_variance(line, &weeks, today, &settings)?;
        write_variance(&report, &weeks, &mut out)?;
    }
    Ok(())
}

pub(crate) fn write_variance<W: std::io::Write>(
    report: &LineVariance,
    weeks: &[WeekAnchor],
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Variance for {} ({})", report.id, report.craft)?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<12} {:>10} {:>10} {:>10}",
        "Week", "Original", "Updated", "Variance"
    )?;
    for (i, w) in weeks.iter().enumerate() {
        let original = report.original.get(i).copied().unwrap_or(0.0);
        let updated = report.updated.get(i).copied().unwrap_or(0.0);
        let v = report.variance.get(i).copied().unwrap_or(Variance {
            value: 0.0,
            kind: VarianceKind::Zero,
        });
        writeln!(
            out,
            "  {:<12} {:>10} {:>10} {:>10} {}",
            w.display,
            original,
            updated,
            v.value,
            v.kind.marker()
        )?;
    }
    writeln!(out, "---")?;
    let total = report.total();
    writeln!(
        out,
        "{:<26} {} {}",
        "Total Variance:",
        total,
        VarianceKind::of(total).marker()
    )?;
    Ok(())
}
