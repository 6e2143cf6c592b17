use crate::calc::{ParsePolicy, WeekAnchor, generate_week_anchors};
use crate::data::persistence::Persistable;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The span of weeks a forecast covers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HorizonConfig {
    /// First week anchor as a `DD-Mon-YY` token.
    pub first_week: String,
    pub week_count: usize,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        HorizonConfig {
            first_week: "07-Aug-25".to_string(),
            week_count: 12,
        }
    }
}

impl HorizonConfig {
    pub fn anchors(&self, today: NaiveDate, policy: ParsePolicy) -> Result<Vec<WeekAnchor>> {
        let first = policy
            .parse(&self.first_week, today)
            .context("failed to parse horizon.first_week")?;
        Ok(generate_week_anchors(first, self.week_count))
    }

    pub fn load() -> Result<Self> {
        Ok(HorizonWrapper::load()?.horizon)
    }
}

/// Reads the `horizon` key of config.yaml.
#[derive(Serialize, Deserialize, Default, Debug)]
struct HorizonWrapper {
    #[serde(default)]
    horizon: HorizonConfig,
}

impl Persistable for HorizonWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}
