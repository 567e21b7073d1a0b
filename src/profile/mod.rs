//! Synthetic hourly profiles built from monthly billing totals.

/// Piecewise-constant consumption shapes.
pub mod consumption;
/// Closed-form solar generation shape.
pub mod solar;
pub mod synthesizer;
/// Two-period time-of-use tariff.
pub mod tariff;
pub mod types;

pub use consumption::{ConsumptionShape, ConsumptionTemplate};
pub use solar::SolarBell;
pub use synthesizer::ProfileSynthesizer;
pub use tariff::TouTariff;
pub use types::{HourlyProfilePoint, MonthProfile, ShapeTemplate};
