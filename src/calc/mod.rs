pub mod conversion;
pub mod cutoff;
pub mod date_token;
pub mod distribution;
pub mod weeks;
pub mod workday;

pub use conversion::{Variance, VarianceKind, hours_to_workforce, variance, workforce_to_hours};
pub use cutoff::current_week_cutoff;
pub use date_token::ParsePolicy;
pub use distribution::{DistributionRequest, distribute, distribute_with};
pub use weeks::{WeekAnchor, generate_week_anchors};
