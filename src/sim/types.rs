//! Core simulation types: billing input, battery parameters, and per-hour/per-month results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use crate::profile::ConsumptionShape;

use super::kpi::MonthKpis;
use super::policy::DispatchPolicy;

/// Export price applied when a billing record does not state one.
pub const DEFAULT_SALE_PRICE: f64 = 0.10;

fn default_sale_price() -> f64 {
    DEFAULT_SALE_PRICE
}

/// One customer billing period, as read off an invoice.
///
/// # Examples
///
/// ```
/// use battery_payback::sim::types::MonthlyBillingRecord;
///
/// let record = MonthlyBillingRecord::new("Mar-Abr", 2955.0, 1940.0, 0.092, 0.129);
/// assert_eq!(record.sale_price, 0.10);
/// assert!(record.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonthlyBillingRecord {
    /// Period label, e.g. `"Mar-Abr"`.
    pub label: String,
    /// Total energy bought from the grid (kWh, >= 0).
    pub consumption_kwh: f64,
    /// Total solar surplus exported to the grid (kWh, >= 0).
    pub surplus_kwh: f64,
    /// Off-peak (valley) purchase price per kWh (> 0).
    pub off_peak_price: f64,
    /// Peak purchase price per kWh (> 0).
    pub peak_price: f64,
    /// Price paid for exported surplus per kWh (>= 0).
    #[serde(default = "default_sale_price")]
    pub sale_price: f64,
}

impl MonthlyBillingRecord {
    /// Creates a record with the default surplus sale price.
    pub fn new(
        label: impl Into<String>,
        consumption_kwh: f64,
        surplus_kwh: f64,
        off_peak_price: f64,
        peak_price: f64,
    ) -> Self {
        Self {
            label: label.into(),
            consumption_kwh,
            surplus_kwh,
            off_peak_price,
            peak_price,
            sale_price: DEFAULT_SALE_PRICE,
        }
    }

    /// Returns the record with a different surplus sale price.
    #[must_use]
    pub fn with_sale_price(mut self, sale_price: f64) -> Self {
        self.sale_price = sale_price;
        self
    }

    /// Checks the caller contract for this record.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: non-finite values, negative
    /// energy totals, non-positive purchase prices, or a negative sale price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("consumption_kwh", self.consumption_kwh),
            ("surplus_kwh", self.surplus_kwh),
            ("off_peak_price", self.off_peak_price),
            ("peak_price", self.peak_price),
            ("sale_price", self.sale_price),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NonFinite {
                field: format!("{}.{field}", self.label),
            });
        }

        for (field, value) in [
            ("consumption_kwh", self.consumption_kwh),
            ("surplus_kwh", self.surplus_kwh),
        ] {
            if value < 0.0 {
                return Err(ValidationError::NegativeQuantity {
                    month: self.label.clone(),
                    field,
                    value,
                });
            }
        }

        for (field, value) in [
            ("off_peak_price", self.off_peak_price),
            ("peak_price", self.peak_price),
        ] {
            if value <= 0.0 {
                return Err(ValidationError::NonPositivePrice {
                    month: self.label.clone(),
                    field,
                    value,
                });
            }
        }

        if self.sale_price < 0.0 {
            return Err(ValidationError::NegativePrice {
                month: self.label.clone(),
                field: "sale_price",
                value: self.sale_price,
            });
        }

        Ok(())
    }
}

/// Battery and inverter nameplate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryParams {
    /// Usable capacity (kWh, > 0).
    pub capacity_kwh: f64,
    /// Inverter limit (kW, > 0). With hourly steps this is the most energy
    /// that can move in or out in one hour.
    pub power_kw: f64,
    /// Round-trip efficiency in (0, 1].
    pub round_trip_efficiency: f64,
}

impl Default for BatteryParams {
    fn default() -> Self {
        Self {
            capacity_kwh: 100.0,
            power_kw: 50.0,
            round_trip_efficiency: 0.90,
        }
    }
}

impl BatteryParams {
    /// Creates battery parameters.
    pub fn new(capacity_kwh: f64, power_kw: f64, round_trip_efficiency: f64) -> Self {
        Self {
            capacity_kwh,
            power_kw,
            round_trip_efficiency,
        }
    }

    /// Checks the caller contract for the battery.
    ///
    /// # Errors
    ///
    /// Returns an error if capacity or power is not positive, or if the
    /// efficiency falls outside `(0, 1]`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("capacity_kwh", self.capacity_kwh),
            ("power_kw", self.power_kw),
            ("round_trip_efficiency", self.round_trip_efficiency),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: format!("battery.{field}"),
                });
            }
        }
        if self.capacity_kwh <= 0.0 {
            return Err(ValidationError::NonPositiveBattery {
                field: "capacity_kwh",
                value: self.capacity_kwh,
            });
        }
        if self.power_kw <= 0.0 {
            return Err(ValidationError::NonPositiveBattery {
                field: "power_kw",
                value: self.power_kw,
            });
        }
        if self.round_trip_efficiency <= 0.0 || self.round_trip_efficiency > 1.0 {
            return Err(ValidationError::EfficiencyOutOfRange(self.round_trip_efficiency));
        }
        Ok(())
    }
}

/// Everything a run needs besides the billing records.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationParams {
    pub battery: BatteryParams,
    /// Replaces every record's own sale price when set.
    pub sale_price_override: Option<f64>,
    pub policy: DispatchPolicy,
    pub consumption_shape: ConsumptionShape,
}

impl SimulationParams {
    /// Parameters with the given battery and all other settings at their defaults.
    pub fn with_battery(battery: BatteryParams) -> Self {
        Self {
            battery,
            ..Self::default()
        }
    }

    /// Sale price in effect for `record`.
    pub fn sale_price_for(&self, record: &MonthlyBillingRecord) -> f64 {
        self.sale_price_override.unwrap_or(record.sale_price)
    }

    /// Checks the battery and the sale price override.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.battery.validate()?;
        if let Some(price) = self.sale_price_override {
            if !price.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: "sale_price".to_string(),
                });
            }
            if price < 0.0 {
                return Err(ValidationError::NegativePrice {
                    month: "*".to_string(),
                    field: "sale_price",
                    value: price,
                });
            }
        }
        Ok(())
    }
}

/// Outcome of one simulated hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyResult {
    /// Hour index within the month.
    pub hour: usize,
    /// Hour of day (0-23).
    pub hour_of_day: usize,
    /// State of charge after the hour (kWh).
    pub soc_kwh: f64,
    /// Gross savings minus charging cost for the hour.
    pub net_balance: f64,
    /// Value of grid purchases avoided by discharging.
    pub gross_savings: f64,
    /// Foregone export revenue plus grid energy bought for arbitrage.
    pub charge_cost: f64,
    /// Solar surplus absorbed instead of exported (kWh).
    pub solar_charged_kwh: f64,
    /// Grid energy bought for arbitrage (kWh).
    pub grid_charged_kwh: f64,
    /// Energy delivered to the load (kWh).
    pub discharged_kwh: f64,
}

impl fmt::Display for HourlyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>3} ({:>2}:00) | soc={:>7.2} kWh | solar+{:.2} grid+{:.2} out-{:.2} | balance={:>7.3}",
            self.hour,
            self.hour_of_day,
            self.soc_kwh,
            self.solar_charged_kwh,
            self.grid_charged_kwh,
            self.discharged_kwh,
            self.net_balance,
        )
    }
}

/// Per-month line of the report table, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// Period label echoed from the input.
    pub label: String,
    /// Net savings for the month, rounded to cents.
    pub savings: f64,
    /// Grid consumption echoed from the input (kWh).
    pub consumption_kwh: f64,
    /// Solar surplus echoed from the input (kWh).
    pub surplus_kwh: f64,
    /// Energy flows behind the savings figure.
    pub kpi: MonthKpis,
}

/// Rounds a money amount to two decimals.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
