use crate::calc::{DistributionRequest, WeekAnchor, distribute, distribute_with};
use crate::data::AppSettings;
use crate::data::persistence::Persistable;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the monthly labor forecast: a craft's to-go hours over a date range.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ForecastLine {
    pub id: String,
    pub craft: String,
    #[serde(default)]
    pub description: String,
    /// `DD-Mon-YY`
    pub start_date: String,
    /// `DD-Mon-YY`
    pub end_date: String,
    pub to_go_hours: f64,
    /// Last stored allocation, one value per horizon week.
    #[serde(default)]
    pub weekly_hours: Vec<f64>,
}

impl ForecastLine {
    pub fn new(id: &str, craft: &str, start_date: &str, end_date: &str, to_go_hours: f64) -> Self {
        ForecastLine {
            id: id.to_string(),
            craft: craft.to_string(),
            description: String::new(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            to_go_hours,
            weekly_hours: Vec::new(),
        }
    }

    pub fn request(&self, weeks: &[WeekAnchor], preserve_past: bool) -> DistributionRequest {
        DistributionRequest {
            total_quantity: self.to_go_hours,
            start_token: self.start_date.clone(),
            end_token: self.end_date.clone(),
            weeks: weeks.to_vec(),
            existing_values: self.weekly_hours.clone(),
            preserve_past,
        }
    }

    /// Reallocates the to-go hours and stores the result as the new snapshot.
    pub fn recalculate(
        &mut self,
        weeks: &[WeekAnchor],
        today: NaiveDate,
        settings: &AppSettings,
    ) -> Result<&[f64]> {
        let request = self.request(weeks, settings.preserve_past);
        self.weekly_hours = distribute_with(&request, today, settings.parse_policy)
            .with_context(|| format!("failed to recalculate line {}", self.id))?;
        Ok(&self.weekly_hours)
    }

    /// What-if allocation that ignores frozen weeks and the stored snapshot.
    pub fn original_baseline(&self, weeks: &[WeekAnchor], today: NaiveDate) -> Vec<f64> {
        let mut request = self.request(weeks, false);
        request.existing_values.clear();
        distribute(&request, today)
    }

    pub fn total_hours(&self) -> f64 {
        self.weekly_hours.iter().fold(0.0, |acc, h| acc + h)
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct ForecastData {
    pub lines: Vec<ForecastLine>,
}

impl Persistable for ForecastData {
    fn filename() -> &'static str {
        "forecast.json"
    }
    fn is_json() -> bool {
        true
    }
}

impl ForecastData {
    pub fn add(&mut self, line: ForecastLine) {
        self.lines.push(line);
    }

    pub fn get_line_by_id(&self, id: &str) -> Option<&ForecastLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Recalculates every line. Returns the number of lines whose snapshot changed.
    pub fn recalculate_all(
        &mut self,
        weeks: &[WeekAnchor],
        today: NaiveDate,
        settings: &AppSettings,
    ) -> Result<usize> {
        let mut changed = 0;
        for line in &mut self.lines {
            let before = line.weekly_hours.clone();
            if line.recalculate(weeks, today, settings)? != before.as_slice() {
                changed += 1;
            }
        }
        Ok(changed)
    }
}
