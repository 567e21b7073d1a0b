//! Battery dispatch simulation over synthesized months.

/// Battery state of charge with clamped charge and discharge.
pub mod battery;
/// Hour clock over the representative month.
pub mod clock;
pub mod engine;
pub mod kpi;
pub mod policy;
pub mod runner;
pub mod types;

pub use engine::{Dispatcher, MonthRun};
pub use runner::{HourlyDetail, Projection, SimulationOutput, simulate};
pub use types::{BatteryParams, MonthlyBillingRecord, SimulationParams};
