use crate::calc::{WeekAnchor, hours_to_workforce, workforce_to_hours};
use crate::data::{AppSettings, ForecastData, HorizonConfig, Persistable};
use anyhow::Result;
use chrono::NaiveDate;

/// Which unit the forecast grid is rendered in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridView {
    Hours,
    /// Craft headcount at the given hours per head.
    Workforce(f64),
}

impl GridView {
    fn cell(self, hours: f64) -> f64 {
        match self {
            GridView::Hours => hours,
            GridView::Workforce(hours_per_head) => hours_to_workforce(hours, hours_per_head),
        }
    }
}

pub fn run(workforce: bool, today: NaiveDate) -> Result<()> {
    let settings = AppSettings::load()?;
    let weeks = HorizonConfig::load()?.anchors(today, settings.parse_policy)?;
    let data = ForecastData::load()?;
    let view = if workforce {
        GridView::Workforce(settings.hours_per_head)
    } else {
        GridView::Hours
    };
    write_grid(&data, &weeks, view, &mut std::io::stdout())
}

pub(crate) fn write_grid<W: std::io::Write>(
    data: &ForecastData,
    weeks: &[WeekAnchor],
    view: GridView,
    out: &mut W,
) -> Result<()> {
    let title = match view {
        GridView::Hours => "Labor Forecast (hours)",
        GridView::Workforce(_) => "Labor Forecast (workforce)",
    };
    writeln!(out, "{}", title)?;
    writeln!(out, "---")?;
    write!(out, "  {:<10} {:<14}", "ID", "Craft")?;
    for w in weeks {
        write!(out, " {:>10}", w.display)?;
    }
    writeln!(out, " {:>10}", "Total")?;

    let mut grand_total = 0.0;
    for line in &data.lines {
        write!(out, "  {:<10} {:<14}", line.id, line.craft)?;
        let mut total = 0.0;
        for i in 0..weeks.len() {
            let cell = view.cell(line.weekly_hours.get(i).copied().unwrap_or(0.0));
            total += cell;
            write!(out, " {:>10}", cell)?;
        }
        writeln!(out, " {:>10}", total)?;
        grand_total += total;
    }
    writeln!(out, "---")?;
    if let GridView::Workforce(hours_per_head) = view {
        writeln!(
            out,
            "Head-weeks: {} (= {} hours at {} per head)",
            grand_total,
            workforce_to_hours(grand_total, hours_per_head),
            hours_per_head
        )?;
    }
    writeln!(out, "Total: {} line(s)", data.lines.len())?;
    Ok(())
}
