//! Battery storage savings and payback estimator for solar self-consumers.
//!
//! Monthly billing totals are expanded into an hourly representative month,
//! a rule-based dispatcher charges the battery from solar surplus and cheap
//! off-peak energy and discharges it against peak-hour consumption, and the
//! monthly balances are annualized into a payback period.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
/// CSV export.
pub mod io;
/// Synthetic hourly profiles built from monthly totals.
pub mod profile;
pub mod report;
/// Dispatch engine, month runner and payback projection.
pub mod sim;
