//! Daily-average quick estimate, used as a sanity check next to the hourly simulation.
//!
//! Each month is collapsed into one average day: the battery stores that
//! day's surplus (up to its capacity), returns it with the round-trip loss,
//! and offsets at most the day's grid consumption at the average purchase
//! price. No hourly timing, no power limit and no arbitrage.

use serde::Serialize;

use crate::error::ValidationError;
use crate::profile::{ProfileSynthesizer, SolarBell};
use crate::sim::clock::DAYS_PER_MONTH;
use crate::sim::types::{BatteryParams, MonthlyBillingRecord, SimulationParams};

/// Average-day result for one billing period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverageEstimate {
    pub label: String,
    /// Surplus stored per day, before losses (kWh).
    pub stored_kwh_per_day: f64,
    /// Stored energy actually used against consumption per day (kWh).
    pub usable_kwh_per_day: f64,
    /// Purchase price the usable energy is valued at.
    pub average_price: f64,
    pub daily_savings: f64,
    pub monthly_savings: f64,
}

/// Estimates one month from its averages.
///
/// # Arguments
///
/// * `record` - The billing period
/// * `battery` - Only capacity and efficiency are used
/// * `sale_price` - Export revenue foregone per stored kWh
/// * `average_price` - Purchase price for the avoided consumption
pub fn daily_average_estimate(
    record: &MonthlyBillingRecord,
    battery: &BatteryParams,
    sale_price: f64,
    average_price: f64,
) -> DailyAverageEstimate {
    let days = DAYS_PER_MONTH as f64;
    let stored = (record.surplus_kwh / days).min(battery.capacity_kwh);
    let usable = (stored * battery.round_trip_efficiency).min(record.consumption_kwh / days);
    let daily_savings = usable * average_price - stored * sale_price;

    DailyAverageEstimate {
        label: record.label.clone(),
        stored_kwh_per_day: stored,
        usable_kwh_per_day: usable,
        average_price,
        daily_savings,
        monthly_savings: daily_savings * days,
    }
}

/// Estimates every record, pricing consumption at the synthesized profile's
/// consumption-weighted mean price.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in the parameters or records.
pub fn estimate_all(
    records: &[MonthlyBillingRecord],
    params: &SimulationParams,
) -> Result<Vec<DailyAverageEstimate>, ValidationError> {
    params.validate()?;
    let synthesizer =
        ProfileSynthesizer::new(params.consumption_shape.template(), SolarBell::default());

    records
        .iter()
        .map(|record| {
            record.validate()?;
            let average_price = synthesizer
                .synthesize(record)
                .mean_purchase_price()
                .unwrap_or(record.peak_price);
            Ok(daily_average_estimate(
                record,
                &params.battery,
                params.sale_price_for(record),
                average_price,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surplus_limited_month() {
        let record = MonthlyBillingRecord::new("Mar-Abr", 2955.0, 1940.0, 0.092, 0.129);
        let est = daily_average_estimate(&record, &BatteryParams::default(), 0.10, 0.115);
        // 1940 / 30 = 64.67 kWh stored, 58.2 usable, below 98.5 consumed
        assert_relative_eq!(est.stored_kwh_per_day, 1940.0 / 30.0, epsilon = 1e-12);
        assert_relative_eq!(est.usable_kwh_per_day, 1940.0 / 30.0 * 0.9, epsilon = 1e-12);
        let daily = 1940.0 / 30.0 * 0.9 * 0.115 - 1940.0 / 30.0 * 0.10;
        assert_relative_eq!(est.daily_savings, daily, epsilon = 1e-12);
        assert_relative_eq!(est.monthly_savings, daily * 30.0, epsilon = 1e-9);
    }

    #[test]
    fn capacity_caps_daily_storage() {
        let record = MonthlyBillingRecord::new("big", 9000.0, 6000.0, 0.1, 0.2);
        let est = daily_average_estimate(&record, &BatteryParams::default(), 0.10, 0.15);
        assert_eq!(est.stored_kwh_per_day, 100.0);
    }

    #[test]
    fn consumption_caps_usable_energy() {
        let record = MonthlyBillingRecord::new("idle", 300.0, 1500.0, 0.1, 0.2);
        let est = daily_average_estimate(&record, &BatteryParams::default(), 0.10, 0.15);
        assert_relative_eq!(est.usable_kwh_per_day, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn estimate_all_uses_profile_mean_price() {
        let records = [MonthlyBillingRecord::new("Mar-Abr", 2955.0, 1940.0, 0.092, 0.129)];
        let estimates = estimate_all(&records, &SimulationParams::default()).unwrap();
        let price = estimates[0].average_price;
        assert!(price > 0.092 && price < 0.129, "mean price {price}");
    }

    #[test]
    fn estimate_all_rejects_invalid_record() {
        let records = [MonthlyBillingRecord::new("bad", -1.0, 10.0, 0.1, 0.2)];
        assert!(estimate_all(&records, &SimulationParams::default()).is_err());
    }
}
