//! Shared types for hourly profile synthesis.

use serde::Serialize;

use super::tariff::TouTariff;

/// A fixed daily shape that distributes a monthly total over hours.
///
/// Templates only provide relative weights; the synthesizer scales them so
/// the month sums to the billed total. Weights must be non-negative.
pub trait ShapeTemplate {
    /// Relative weight for the given hour of day (0-23).
    fn weight(&self, hour_of_day: usize) -> f64;

    /// Returns a human-readable name for the template.
    fn name(&self) -> &'static str;
}

/// One synthesized hour of the representative month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyProfilePoint {
    /// Hour of day, derived from the hour index.
    pub hour_of_day: usize,
    /// Grid consumption during the hour (kWh).
    pub consumption_kwh: f64,
    /// Solar surplus available during the hour (kWh).
    pub solar_kwh: f64,
    /// Purchase price applicable to the hour.
    pub price: f64,
    /// `true` for the cheap tariff period.
    pub off_peak: bool,
}

/// The hourly profile of one month together with the tariff it was priced with.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthProfile {
    /// Billing period label.
    pub label: String,
    /// Chronologically ordered hours.
    pub points: Vec<HourlyProfilePoint>,
    /// Two-period tariff used to price the hours.
    pub tariff: TouTariff,
}

impl MonthProfile {
    /// Total consumption across the month (kWh).
    pub fn total_consumption_kwh(&self) -> f64 {
        self.points.iter().map(|p| p.consumption_kwh).sum()
    }

    /// Total solar surplus across the month (kWh).
    pub fn total_solar_kwh(&self) -> f64 {
        self.points.iter().map(|p| p.solar_kwh).sum()
    }

    /// Consumption-weighted mean purchase price, or `None` without consumption.
    pub fn mean_purchase_price(&self) -> Option<f64> {
        let consumption = self.total_consumption_kwh();
        if consumption > 0.0 {
            let cost: f64 = self
                .points
                .iter()
                .map(|p| p.consumption_kwh * p.price)
                .sum();
            Some(cost / consumption)
        } else {
            None
        }
    }
}
