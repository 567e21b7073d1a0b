//! Fixed rules governing when the battery charges from the grid.

use serde::{Deserialize, Serialize};

use crate::profile::tariff::TouTariff;

/// Minimum spread per kWh, after losses, before grid charging is worth it.
pub const ARBITRAGE_MARGIN_THRESHOLD: f64 = 0.02;

/// Whether solar and grid charging may share an hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ChargeExclusivity {
    /// Grid charging only in hours where no solar energy was absorbed.
    #[default]
    Exclusive,
    /// Both may charge in the same hour, sharing the inverter limit.
    Combined,
}

/// Dispatch rules for one simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchPolicy {
    pub charge_exclusivity: ChargeExclusivity,
}

impl DispatchPolicy {
    pub fn new(charge_exclusivity: ChargeExclusivity) -> Self {
        Self { charge_exclusivity }
    }

    /// Returns `true` if grid charging may follow `solar_absorbed_kwh` of solar charging.
    pub fn allows_grid_charge_after(&self, solar_absorbed_kwh: f64) -> bool {
        match self.charge_exclusivity {
            ChargeExclusivity::Exclusive => solar_absorbed_kwh == 0.0,
            ChargeExclusivity::Combined => true,
        }
    }
}

/// Peak price minus the off-peak price grossed up for round-trip losses.
pub fn arbitrage_margin(tariff: &TouTariff, round_trip_efficiency: f64) -> f64 {
    tariff.peak_price - tariff.off_peak_price / round_trip_efficiency
}

/// Returns `true` if the margin strictly exceeds [`ARBITRAGE_MARGIN_THRESHOLD`].
pub fn arbitrage_is_profitable(tariff: &TouTariff, round_trip_efficiency: f64) -> bool {
    arbitrage_margin(tariff, round_trip_efficiency) > ARBITRAGE_MARGIN_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_accounts_for_losses() {
        let tariff = TouTariff::new(0.09, 0.13);
        let margin = arbitrage_margin(&tariff, 0.9);
        assert!((margin - 0.03).abs() < 1e-12);
    }

    #[test]
    fn invoice_spring_tariff_is_profitable() {
        assert!(arbitrage_is_profitable(&TouTariff::new(0.092, 0.129), 0.9));
    }

    #[test]
    fn summer_tariff_is_profitable() {
        assert!(arbitrage_is_profitable(&TouTariff::new(0.131, 0.180), 0.9));
    }

    #[test]
    fn margin_at_threshold_is_not_profitable() {
        let tariff = TouTariff::new(0.01, 0.04);
        assert_eq!(arbitrage_margin(&tariff, 0.5), ARBITRAGE_MARGIN_THRESHOLD);
        assert!(!arbitrage_is_profitable(&tariff, 0.5));
    }

    #[test]
    fn margin_just_above_threshold_is_profitable() {
        assert!(arbitrage_is_profitable(&TouTariff::new(0.01, 0.041), 0.5));
    }

    #[test]
    fn exclusive_blocks_grid_after_solar() {
        let policy = DispatchPolicy::default();
        assert!(policy.allows_grid_charge_after(0.0));
        assert!(!policy.allows_grid_charge_after(0.5));
    }

    #[test]
    fn combined_always_allows_grid() {
        let policy = DispatchPolicy::new(ChargeExclusivity::Combined);
        assert!(policy.allows_grid_charge_after(0.5));
    }
}
