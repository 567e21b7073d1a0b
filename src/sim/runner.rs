//! Month loop: synthesize, dispatch, aggregate, and project the payback.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::profile::{ProfileSynthesizer, SolarBell};

use super::engine::Dispatcher;
use super::kpi::MonthKpis;
use super::types::{
    HourlyResult, MonthlyBillingRecord, MonthlySummary, SimulationParams, round_cents,
};

/// Payback at or below this many years counts as viable.
pub const VIABLE_PAYBACK_YEARS: f64 = 10.0;

/// Payback reported when the battery never pays for itself.
pub const PAYBACK_SENTINEL_YEARS: f64 = 999.0;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Full hourly trace of one month, kept for plotting and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyDetail {
    /// Index of the month in the input sequence.
    pub month_index: usize,
    pub label: String,
    pub hours: Vec<HourlyResult>,
    /// Running sum of the hourly net balance.
    pub cumulative_savings: Vec<f64>,
}

/// An inclusive hour range borrowed from an [`HourlyDetail`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetailWindow<'a> {
    pub from: usize,
    pub hours: &'a [HourlyResult],
    pub cumulative_savings: &'a [f64],
}

impl HourlyDetail {
    fn new(month_index: usize, label: String, hours: Vec<HourlyResult>) -> Self {
        let cumulative_savings = hours
            .iter()
            .scan(0.0, |acc, h| {
                *acc += h.net_balance;
                Some(*acc)
            })
            .collect();
        Self {
            month_index,
            label,
            hours,
            cumulative_savings,
        }
    }

    /// Returns hours `from..=to`, clamped to the month.
    ///
    /// An empty window comes back when `from` is past the end or after `to`.
    pub fn window(&self, from: usize, to: usize) -> DetailWindow<'_> {
        let len = self.hours.len();
        if from >= len || from > to {
            return DetailWindow {
                from,
                hours: &[],
                cumulative_savings: &[],
            };
        }
        let end = to.min(len - 1) + 1;
        DetailWindow {
            from,
            hours: &self.hours[from..end],
            cumulative_savings: &self.cumulative_savings[from..end],
        }
    }
}

/// Everything a simulation run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutput {
    /// One summary per input record, in input order.
    pub summaries: Vec<MonthlySummary>,
    /// Sum of the unrounded monthly net balances.
    pub total_savings: f64,
    /// Hourly trace of the designated month, absent for empty input.
    pub detail: Option<HourlyDetail>,
}

impl SimulationOutput {
    /// Annualizes the total and derives the payback period.
    pub fn projection(&self, installation_cost: f64) -> Projection {
        Projection::new(self.total_savings, self.summaries.len(), installation_cost)
    }
}

/// Annualized savings and simple payback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub total_savings: f64,
    pub annualized_savings: f64,
    /// Years to recover the installation cost, or [`PAYBACK_SENTINEL_YEARS`].
    pub payback_years: f64,
    pub installation_cost: f64,
    /// `true` when the payback is at most [`VIABLE_PAYBACK_YEARS`].
    pub viable: bool,
}

impl Projection {
    /// Extrapolates `total_savings` over `months` to a year.
    ///
    /// Zero months annualize to zero savings, which in turn yields the
    /// sentinel payback.
    pub fn new(total_savings: f64, months: usize, installation_cost: f64) -> Self {
        let annualized_savings = if months > 0 {
            total_savings / months as f64 * MONTHS_PER_YEAR
        } else {
            0.0
        };
        let payback_years = if annualized_savings > 0.0 {
            installation_cost / annualized_savings
        } else {
            PAYBACK_SENTINEL_YEARS
        };
        let viable = payback_years <= VIABLE_PAYBACK_YEARS;

        if annualized_savings <= 0.0 {
            warn!(annualized_savings, "battery does not generate savings");
        } else if !viable {
            warn!(
                payback_years,
                "payback exceeds {VIABLE_PAYBACK_YEARS} years, consider an indexed tariff"
            );
        }

        Self {
            total_savings,
            annualized_savings,
            payback_years,
            installation_cost,
            viable,
        }
    }
}

/// Simulates every billing record and aggregates the results.
///
/// All inputs are validated before the first hour is simulated. Months are
/// independent: each starts with an empty battery.
///
/// # Arguments
///
/// * `records` - Billing periods, in the order they should be reported
/// * `params` - Battery, policy and sale price settings
/// * `detail_month` - Index of the month whose hourly trace is kept; the last
///   month when `None`
///
/// # Errors
///
/// Returns the first [`ValidationError`] found in the parameters or records,
/// or [`ValidationError::DetailMonthOutOfRange`] for a bad detail index.
pub fn simulate(
    records: &[MonthlyBillingRecord],
    params: &SimulationParams,
    detail_month: Option<usize>,
) -> Result<SimulationOutput, ValidationError> {
    params.validate()?;
    for record in records {
        record.validate()?;
    }
    if let Some(index) = detail_month.filter(|&i| i >= records.len()) {
        return Err(ValidationError::DetailMonthOutOfRange {
            index,
            months: records.len(),
        });
    }
    let detail_index = detail_month.or_else(|| records.len().checked_sub(1));

    let synthesizer =
        ProfileSynthesizer::new(params.consumption_shape.template(), SolarBell::default());

    let mut summaries = Vec::with_capacity(records.len());
    let mut total_savings = 0.0;
    let mut detail = None;

    for (index, record) in records.iter().enumerate() {
        let profile = synthesizer.synthesize(record);
        let mut dispatcher =
            Dispatcher::new(&params.battery, params.policy, params.sale_price_for(record));
        let run = dispatcher.run(&profile);
        let kpi = MonthKpis::from_results(&run.hours, params.battery.capacity_kwh);

        debug!(month = %record.label, savings = run.net_balance, "{kpi}");

        total_savings += run.net_balance;
        summaries.push(MonthlySummary {
            label: record.label.clone(),
            savings: round_cents(run.net_balance),
            consumption_kwh: record.consumption_kwh,
            surplus_kwh: record.surplus_kwh,
            kpi,
        });

        if detail_index == Some(index) {
            detail = Some(HourlyDetail::new(index, record.label.clone(), run.hours));
        }
    }

    info!(
        months = summaries.len(),
        total_savings,
        template = ?params.consumption_shape,
        exclusivity = ?params.policy.charge_exclusivity,
        "simulation complete"
    );

    Ok(SimulationOutput {
        summaries,
        total_savings,
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::types::BatteryParams;
    use approx::assert_relative_eq;

    fn records() -> Vec<MonthlyBillingRecord> {
        vec![
            MonthlyBillingRecord::new("Mar-Abr", 2955.0, 1940.0, 0.092, 0.129),
            MonthlyBillingRecord::new("Abr-May", 3397.0, 1708.0, 0.092, 0.130),
        ]
    }

    fn run(detail_month: Option<usize>) -> SimulationOutput {
        simulate(&records(), &SimulationParams::default(), detail_month).unwrap()
    }

    #[test]
    fn one_summary_per_record_in_order() {
        let out = run(None);
        let labels: Vec<_> = out.summaries.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Mar-Abr", "Abr-May"]);
    }

    #[test]
    fn detail_defaults_to_last_month() {
        let detail = run(None).detail.unwrap();
        assert_eq!(detail.label, "Abr-May");
        assert_eq!(detail.hours.len(), 720);
    }

    #[test]
    fn detail_month_can_be_chosen() {
        assert_eq!(run(Some(0)).detail.unwrap().month_index, 0);
    }

    #[test]
    fn detail_month_out_of_range() {
        let err = simulate(&records(), &SimulationParams::default(), Some(2));
        assert_eq!(
            err,
            Err(ValidationError::DetailMonthOutOfRange {
                index: 2,
                months: 2
            })
        );
    }

    #[test]
    fn invalid_record_aborts_before_simulating() {
        let mut bad = records();
        bad[1].off_peak_price = 0.0;
        let err = simulate(&bad, &SimulationParams::default(), None);
        assert!(matches!(err, Err(ValidationError::NonPositivePrice { .. })));
    }

    #[test]
    fn invalid_battery_rejected() {
        let params = SimulationParams::with_battery(BatteryParams::new(100.0, 50.0, 1.5));
        let err = simulate(&records(), &params, None);
        assert_eq!(err, Err(ValidationError::EfficiencyOutOfRange(1.5)));
    }

    #[test]
    fn empty_input_gives_zero_total() {
        let out = simulate(&[], &SimulationParams::default(), None).unwrap();
        assert!(out.summaries.is_empty());
        assert_eq!(out.total_savings, 0.0);
        assert!(out.detail.is_none());
    }

    #[test]
    fn cumulative_trace_ends_at_month_total() {
        let detail = run(Some(0)).detail.unwrap();
        let unrounded: f64 = detail.hours.iter().map(|h| h.net_balance).sum();
        assert_relative_eq!(*detail.cumulative_savings.last().unwrap(), unrounded, epsilon = 1e-9);
    }

    #[test]
    fn window_is_inclusive_and_clamped() {
        let detail = run(None).detail.unwrap();
        let w = detail.window(240, 288);
        assert_eq!(w.hours.len(), 49);
        assert_eq!(w.hours[0].hour, 240);
        assert_eq!(w.cumulative_savings.len(), 49);

        assert_eq!(detail.window(700, 10_000).hours.len(), 20);
        assert!(detail.window(720, 800).hours.is_empty());
        assert!(detail.window(10, 5).hours.is_empty());
    }

    #[test]
    fn projection_annualizes_and_divides() {
        let p = Projection::new(300.0, 3, 12_000.0);
        assert_relative_eq!(p.annualized_savings, 1200.0);
        assert_relative_eq!(p.payback_years, 10.0);
        assert!(p.viable);
    }

    #[test]
    fn projection_sentinel_when_no_savings() {
        let p = Projection::new(-5.0, 4, 30_000.0);
        assert_eq!(p.payback_years, PAYBACK_SENTINEL_YEARS);
        assert!(!p.viable);

        let p = Projection::new(0.0, 0, 30_000.0);
        assert_eq!(p.annualized_savings, 0.0);
        assert_eq!(p.payback_years, PAYBACK_SENTINEL_YEARS);
    }
}
