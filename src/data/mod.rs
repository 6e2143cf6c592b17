pub mod app_settings;
pub mod forecast;
pub mod horizon;
pub mod persistence;

pub use app_settings::AppSettings;
pub use forecast::{ForecastData, ForecastLine};
pub use horizon::HorizonConfig;
pub use persistence::Persistable;
