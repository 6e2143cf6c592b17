use crate::calc::ParsePolicy;
use crate::data::{AppSettings, ForecastData, ForecastLine, HorizonConfig, Persistable};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Combined struct for serializing config.yaml in one pass.
/// `HorizonConfig` and `AppSettings` both read config.yaml independently,
/// but writing them separately would overwrite each other, so they are combined here.
#[derive(Serialize)]
struct ConfigFile {
    settings: AppSettings,
    horizon: HorizonConfig,
}

pub fn run() -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    run_in_dir(&dir)?;
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes all default data files into `dir`.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let config = ConfigFile {
        settings: AppSettings::default(),
        horizon: HorizonConfig::default(),
    };
    fs::write(dir.join("config.yaml"), serde_norway::to_string(&config)?)?;
    sample_forecast(&config.horizon)?.save_to(dir)?;
    Ok(())
}

/// Sample lines seeded with their baseline allocation over the horizon.
fn sample_forecast(horizon: &HorizonConfig) -> Result<ForecastData> {
    let first = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap_or_default();
    let weeks = horizon.anchors(first, ParsePolicy::Strict)?;

    let mut data = ForecastData::default();
    for (id, craft, start, end, hours) in [
        ("MLF-001", "Pipefitter", "07-Aug-25", "26-Sep-25", 2400.0),
        ("MLF-002", "Electrician", "18-Aug-25", "10-Oct-25", 1800.0),
        ("MLF-003", "Ironworker", "04-Sep-25", "23-Oct-25", 960.0),
    ] {
        let mut line = ForecastLine::new(id, craft, start, end, hours);
        line.weekly_hours = line.original_baseline(&weeks, first);
        data.add(line);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_all_files() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        assert!(tmp.path().join("config.yaml").exists());
        assert!(tmp.path().join("forecast.json").exists());
    }

    #[test]
    fn test_config_yaml_contains_settings_and_horizon() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        let raw = fs::read_to_string(tmp.path().join("config.yaml")).unwrap();
        assert!(raw.contains("settings:"));
        assert!(raw.contains("hours_per_head"));
        assert!(raw.contains("horizon:"));
        assert!(raw.contains("07-Aug-25"));
    }

    #[test]
    fn test_sample_forecast_is_seeded() {
        let tmp = TempDir::new().unwrap();
        run_in_dir(tmp.path()).unwrap();
        let data = ForecastData::load_from(tmp.path()).unwrap();
        assert_eq!(data.lines.len(), 3);
        for line in &data.lines {
            assert_eq!(line.weekly_hours.len(), HorizonConfig::default().week_count);
            assert!((line.total_hours() - line.to_go_hours).abs() <= line.weekly_hours.len() as f64);
        }
    }

    #[test]
    fn test_init_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("fresh");
        run_in_dir(&nested).unwrap();
        assert!(nested.join("forecast.json").exists());
    }
}
