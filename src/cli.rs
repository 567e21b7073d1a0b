//! Command-line arguments and how they layer onto a scenario.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, ScenarioConfig};
use crate::profile::ConsumptionShape;
use crate::sim::policy::ChargeExclusivity;

/// Estimates the savings and payback of adding a battery to a solar installation.
///
/// If neither `--scenario` nor `--preset` is given, the baseline preset is used.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Load the scenario from a TOML file.
    #[clap(long, env = "BATTERY_PAYBACK_SCENARIO", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, indexed_tariff, large_battery).
    #[clap(long, env = "BATTERY_PAYBACK_PRESET")]
    pub preset: Option<String>,

    /// Battery capacity in kWh.
    #[clap(long, env = "BATTERY_CAPACITY_KWH")]
    pub capacity_kwh: Option<f64>,

    /// Inverter power limit in kW.
    #[clap(long, env = "BATTERY_POWER_KW")]
    pub power_kw: Option<f64>,

    /// Round-trip efficiency, in (0, 1].
    #[clap(long, env = "BATTERY_EFFICIENCY")]
    pub efficiency: Option<f64>,

    /// Surplus sale price applied to every month.
    #[clap(long, env = "SURPLUS_SALE_PRICE")]
    pub sale_price: Option<f64>,

    /// Installed cost of the battery system.
    #[clap(long, env = "INSTALLATION_COST")]
    pub installation_cost: Option<f64>,

    /// Consumption weight set.
    #[clap(long, value_enum)]
    pub consumption_template: Option<ConsumptionShape>,

    /// Whether solar and grid charging may share an hour.
    #[clap(long, value_enum)]
    pub charge_exclusivity: Option<ChargeExclusivity>,

    /// Index of the month whose hourly trace is shown and exported.
    #[clap(long)]
    pub detail_month: Option<usize>,

    /// First hour of the detail window printed after the report.
    #[clap(long, default_value = "240")]
    pub detail_from: usize,

    /// Last hour (inclusive) of the detail window.
    #[clap(long, default_value = "287")]
    pub detail_to: usize,

    /// Export the detail month's hourly trace to CSV.
    #[clap(long)]
    pub hourly_out: Option<PathBuf>,

    /// Export the monthly table to CSV.
    #[clap(long)]
    pub summary_out: Option<PathBuf>,

    /// Show the daily-average estimate next to each month.
    #[clap(long)]
    pub daily_average: bool,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[clap(long, short)]
    pub verbose: bool,

    /// Start the REST API after the simulation (needs the `api` feature).
    #[clap(long, hide = !cfg!(feature = "api"))]
    pub serve: bool,

    /// API server port.
    #[clap(long, default_value = "3000", env = "PORT", hide = !cfg!(feature = "api"))]
    pub port: u16,
}

impl Args {
    /// Loads the selected scenario and applies the command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed, or the
    /// preset is unknown.
    pub fn scenario(&self) -> Result<ScenarioConfig, ConfigError> {
        let mut scenario = if let Some(path) = &self.scenario {
            ScenarioConfig::from_toml_file(path)?
        } else if let Some(name) = &self.preset {
            ScenarioConfig::from_preset(name)?
        } else {
            ScenarioConfig::baseline()
        };
        self.apply_overrides(&mut scenario);
        Ok(scenario)
    }

    fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(capacity) = self.capacity_kwh {
            scenario.battery.capacity_kwh = capacity;
        }
        if let Some(power) = self.power_kw {
            scenario.battery.power_kw = power;
        }
        if let Some(efficiency) = self.efficiency {
            scenario.battery.round_trip_efficiency = efficiency;
        }
        if let Some(price) = self.sale_price {
            scenario.economics.sale_price = Some(price);
        }
        if let Some(cost) = self.installation_cost {
            scenario.economics.installation_cost = cost;
        }
        if let Some(shape) = self.consumption_template {
            scenario.policy.consumption_template = shape;
        }
        if let Some(exclusivity) = self.charge_exclusivity {
            scenario.policy.charge_exclusivity = exclusivity;
        }
        if let Some(index) = self.detail_month {
            scenario.report.detail_month = Some(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("battery-payback").chain(args.iter().copied()))
    }

    fn scenario(args: &[&str]) -> ScenarioConfig {
        parse(args).unwrap().scenario().unwrap()
    }

    #[test]
    fn defaults_to_baseline() {
        assert_eq!(scenario(&[]), ScenarioConfig::baseline());
    }

    #[test]
    fn supports_preset_cli() {
        assert_eq!(scenario(&["--preset", "large_battery"]).battery.capacity_kwh, 200.0);
    }

    #[test]
    fn scenario_and_preset_are_exclusive() {
        assert!(parse(&["--scenario", "s.toml", "--preset", "baseline"]).is_err());
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let args = parse(&["--preset", "nope"]).unwrap();
        assert!(args.scenario().is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let s = scenario(&[
            "--preset",
            "baseline",
            "--capacity-kwh",
            "150",
            "--efficiency",
            "0.95",
            "--sale-price",
            "0.08",
            "--charge-exclusivity",
            "combined",
            "--consumption-template",
            "hospitality-legacy",
            "--detail-month",
            "0",
        ]);
        assert_eq!(s.battery.capacity_kwh, 150.0);
        assert_eq!(s.battery.power_kw, 50.0);
        assert_eq!(s.battery.round_trip_efficiency, 0.95);
        assert_eq!(s.economics.sale_price, Some(0.08));
        assert_eq!(s.policy.charge_exclusivity, ChargeExclusivity::Combined);
        assert_eq!(s.policy.consumption_template, ConsumptionShape::HospitalityLegacy);
        assert_eq!(s.report.detail_month, Some(0));
    }
}
