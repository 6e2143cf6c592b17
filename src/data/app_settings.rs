use crate::calc::ParsePolicy;
use crate::calc::conversion::HOURS_PER_HEAD;
use crate::data::persistence::Persistable;
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Weekly hours per craft head in the workforce view.
    pub hours_per_head: f64,
    /// Freeze weeks before the cutoff during recalculation.
    pub preserve_past: bool,
    pub parse_policy: ParsePolicy,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            hours_per_head: HOURS_PER_HEAD,
            preserve_past: true,
            parse_policy: ParsePolicy::Lenient,
        }
    }
}

/// Wrapper that reads the `settings` key from config.yaml.
/// `HorizonConfig` reads the same file for its `horizon` key; both work
/// independently because serde ignores unknown fields by default.
#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: AppSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl AppSettings {
    pub fn load() -> Result<Self> {
        Ok(SettingsWrapper::load()?.settings)
    }
}
