//! Post-hoc energy KPIs computed from a month of hourly results.

use std::fmt;

use serde::Serialize;

use super::types::HourlyResult;

/// Energy flows and money behind one month's savings figure.
///
/// Computed from the hourly results so the KPIs always agree with the
/// balance they explain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthKpis {
    /// Solar surplus stored instead of exported (kWh).
    pub solar_charged_kwh: f64,
    /// Grid energy bought off-peak for arbitrage (kWh).
    pub grid_charged_kwh: f64,
    /// Energy delivered to the load (kWh).
    pub discharged_kwh: f64,
    /// Value of avoided purchases.
    pub gross_savings: f64,
    /// Foregone export revenue plus arbitrage purchases.
    pub charge_cost: f64,
    /// Battery throughput, charged plus discharged (kWh).
    pub throughput_kwh: f64,
    /// Equivalent full cycles, `throughput / (2 * capacity)`.
    pub equivalent_full_cycles: f64,
    /// Highest state of charge reached (kWh).
    pub peak_soc_kwh: f64,
}

impl MonthKpis {
    /// Computes the KPIs for one month.
    ///
    /// # Arguments
    ///
    /// * `results` - The month's hourly results in order
    /// * `capacity_kwh` - Battery capacity for the cycle count
    pub fn from_results(results: &[HourlyResult], capacity_kwh: f64) -> Self {
        let mut kpi = Self::default();
        for r in results {
            kpi.solar_charged_kwh += r.solar_charged_kwh;
            kpi.grid_charged_kwh += r.grid_charged_kwh;
            kpi.discharged_kwh += r.discharged_kwh;
            kpi.gross_savings += r.gross_savings;
            kpi.charge_cost += r.charge_cost;
            kpi.peak_soc_kwh = kpi.peak_soc_kwh.max(r.soc_kwh);
        }
        kpi.throughput_kwh = kpi.solar_charged_kwh + kpi.grid_charged_kwh + kpi.discharged_kwh;
        kpi.equivalent_full_cycles = if capacity_kwh > 0.0 {
            kpi.throughput_kwh / (2.0 * capacity_kwh)
        } else {
            0.0
        };
        kpi
    }
}

impl fmt::Display for MonthKpis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "solar in {:.1} kWh, grid in {:.1} kWh, out {:.1} kWh, {:.2} cycles",
            self.solar_charged_kwh,
            self.grid_charged_kwh,
            self.discharged_kwh,
            self.equivalent_full_cycles
        )
    }
}
