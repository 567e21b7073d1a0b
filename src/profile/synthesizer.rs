//! Expands monthly billing totals into an hourly profile.

use crate::sim::clock::{Clock, HOURS_PER_MONTH};
use crate::sim::types::MonthlyBillingRecord;

use super::consumption::ConsumptionTemplate;
use super::solar::SolarBell;
use super::tariff::TouTariff;
use super::types::{HourlyProfilePoint, MonthProfile, ShapeTemplate};

/// Builds the representative month for a billing record.
///
/// Pure and deterministic: the same record always yields the same profile.
#[derive(Debug, Clone)]
pub struct ProfileSynthesizer {
    consumption: ConsumptionTemplate,
    solar: SolarBell,
}

impl Default for ProfileSynthesizer {
    fn default() -> Self {
        Self::new(ConsumptionTemplate::hospitality(), SolarBell::default())
    }
}

impl ProfileSynthesizer {
    pub fn new(consumption: ConsumptionTemplate, solar: SolarBell) -> Self {
        Self { consumption, solar }
    }

    /// Synthesizes the 720-hour profile for `record`.
    ///
    /// Consumption and solar series each sum to the record's totals. A
    /// template whose weights sum to zero yields an all-zero series.
    pub fn synthesize(&self, record: &MonthlyBillingRecord) -> MonthProfile {
        let consumption = scale_to_total(&self.consumption, record.consumption_kwh);
        let solar = scale_to_total(&self.solar, record.surplus_kwh);
        let tariff = TouTariff::new(record.off_peak_price, record.peak_price);

        let points = Clock::month()
            .map(|tick| HourlyProfilePoint {
                hour_of_day: tick.hour_of_day,
                consumption_kwh: consumption[tick.index],
                solar_kwh: solar[tick.index],
                price: tariff.price_at(tick.hour_of_day),
                off_peak: TouTariff::is_off_peak(tick.hour_of_day),
            })
            .collect();

        MonthProfile {
            label: record.label.clone(),
            points,
            tariff,
        }
    }
}

/// Spreads `total` over the month in proportion to the template weights.
pub fn scale_to_total(template: &impl ShapeTemplate, total: f64) -> Vec<f64> {
    let weights: Vec<f64> = Clock::month()
        .map(|tick| template.weight(tick.hour_of_day))
        .collect();
    let weight_sum: f64 = weights.iter().sum();
    let factor = if weight_sum > 0.0 {
        total / weight_sum
    } else {
        0.0
    };
    debug_assert_eq!(weights.len(), HOURS_PER_MONTH);
    weights.into_iter().map(|w| w * factor).collect()
}
