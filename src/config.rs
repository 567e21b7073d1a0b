//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::profile::ConsumptionShape;
use crate::sim::policy::{ChargeExclusivity, DispatchPolicy};
use crate::sim::runner::{SimulationOutput, simulate};
use crate::sim::types::{BatteryParams, MonthlyBillingRecord, SimulationParams};

/// Top-level scenario configuration parsed from TOML.
///
/// Every section has a default, so a file may hold nothing but its
/// `[[months]]`. Load from TOML with [`ScenarioConfig::from_toml_file`] or
/// start from [`ScenarioConfig::baseline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Battery and inverter nameplate.
    #[serde(default)]
    pub battery: BatteryParams,
    /// Investment and export price.
    #[serde(default)]
    pub economics: EconomicsConfig,
    /// Profile shape and dispatch rules.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Report options.
    #[serde(default)]
    pub report: ReportConfig,
    /// Billing periods, in report order.
    #[serde(default)]
    pub months: Vec<MonthlyBillingRecord>,
}

/// Investment and export price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomicsConfig {
    /// Installed cost of the battery system.
    pub installation_cost: f64,
    /// When set, replaces every month's own surplus sale price.
    pub sale_price: Option<f64>,
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            installation_cost: 30_000.0,
            sale_price: None,
        }
    }
}

/// Profile shape and dispatch rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Consumption weight set: `hospitality` or `hospitality_legacy`.
    pub consumption_template: ConsumptionShape,
    /// `exclusive` or `combined` solar/grid charging.
    pub charge_exclusivity: ChargeExclusivity,
}

/// Report options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Index of the month whose hourly trace is kept (last month if unset).
    pub detail_month: Option<usize>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The four billing periods read off the customer's invoices.
fn invoice_months() -> Vec<MonthlyBillingRecord> {
    vec![
        MonthlyBillingRecord::new("Mar-Abr", 2955.0, 1940.0, 0.092, 0.129),
        MonthlyBillingRecord::new("Abr-May", 3397.0, 1708.0, 0.092, 0.130),
        MonthlyBillingRecord::new("May-Jun", 5891.0, 1352.0, 0.130, 0.172),
        MonthlyBillingRecord::new("Jun-Jul", 6563.0, 1399.0, 0.131, 0.180),
    ]
}

impl ScenarioConfig {
    /// Returns the baseline scenario: invoice months, 100 kWh / 50 kW / 90 %.
    pub fn baseline() -> Self {
        Self {
            battery: BatteryParams::default(),
            economics: EconomicsConfig::default(),
            policy: PolicyConfig::default(),
            report: ReportConfig::default(),
            months: invoice_months(),
        }
    }

    /// Returns the indexed-tariff preset: same months with a 0.05 off-peak price.
    pub fn indexed_tariff() -> Self {
        Self {
            months: invoice_months()
                .into_iter()
                .map(|mut m| {
                    m.off_peak_price = 0.05;
                    m
                })
                .collect(),
            ..Self::baseline()
        }
    }

    /// Returns the large-battery preset: 200 kWh / 100 kW.
    pub fn large_battery() -> Self {
        Self {
            battery: BatteryParams {
                capacity_kwh: 200.0,
                power_kw: 100.0,
                ..BatteryParams::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "indexed_tariff", "large_battery"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "indexed_tariff" => Ok(Self::indexed_tariff()),
            "large_battery" => Ok(Self::large_battery()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Simulation parameters described by this scenario.
    pub fn simulation_params(&self) -> SimulationParams {
        SimulationParams {
            battery: self.battery,
            sale_price_override: self.economics.sale_price,
            policy: DispatchPolicy::new(self.policy.charge_exclusivity),
            consumption_shape: self.policy.consumption_template,
        }
    }

    /// Runs the simulation this scenario describes.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] in the battery, prices or months.
    pub fn run(&self) -> Result<SimulationOutput, ValidationError> {
        simulate(
            &self.months,
            &self.simulation_params(),
            self.report.detail_month,
        )
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let bat = &self.battery;
        if !(bat.capacity_kwh > 0.0 && bat.capacity_kwh.is_finite()) {
            errors.push(ConfigError::new("battery.capacity_kwh", "must be > 0"));
        }
        if !(bat.power_kw > 0.0 && bat.power_kw.is_finite()) {
            errors.push(ConfigError::new("battery.power_kw", "must be > 0"));
        }
        if !(bat.round_trip_efficiency > 0.0 && bat.round_trip_efficiency <= 1.0) {
            errors.push(ConfigError::new(
                "battery.round_trip_efficiency",
                "must be in (0.0, 1.0]",
            ));
        }

        let eco = &self.economics;
        if !(eco.installation_cost >= 0.0 && eco.installation_cost.is_finite()) {
            errors.push(ConfigError::new("economics.installation_cost", "must be >= 0"));
        }
        if eco
            .sale_price
            .is_some_and(|price| !(price >= 0.0 && price.is_finite()))
        {
            errors.push(ConfigError::new("economics.sale_price", "must be >= 0"));
        }

        if self
            .report
            .detail_month
            .is_some_and(|index| index >= self.months.len())
        {
            errors.push(ConfigError::new(
                "report.detail_month",
                format!("must be < number of months ({})", self.months.len()),
            ));
        }

        for (i, m) in self.months.iter().enumerate() {
            if let Err(e) = m.validate() {
                errors.push(ConfigError::new(format!("months[{i}]"), e.to_string()));
            }
        }

        errors
    }
}
