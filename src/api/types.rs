//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::sim::runner::{DetailWindow, HourlyDetail, Projection};
use crate::sim::types::{BatteryParams, HourlyResult, MonthlySummary};

/// Monthly table and payback of the loaded scenario.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Battery the scenario was simulated with.
    pub battery: BatteryParams,
    /// One entry per billing period, in input order.
    pub months: Vec<MonthlySummary>,
    pub projection: Projection,
}

/// One hour of the detail trace.
#[derive(Debug, Serialize)]
pub struct DetailRecord {
    pub hour: usize,
    pub hour_of_day: usize,
    pub soc_kwh: f64,
    pub solar_charged_kwh: f64,
    pub grid_charged_kwh: f64,
    pub discharged_kwh: f64,
    pub net_balance: f64,
    /// Running savings total up to and including this hour.
    pub cumulative_savings: f64,
}

impl DetailRecord {
    fn new(r: &HourlyResult, cumulative_savings: f64) -> Self {
        Self {
            hour: r.hour,
            hour_of_day: r.hour_of_day,
            soc_kwh: r.soc_kwh,
            solar_charged_kwh: r.solar_charged_kwh,
            grid_charged_kwh: r.grid_charged_kwh,
            discharged_kwh: r.discharged_kwh,
            net_balance: r.net_balance,
            cumulative_savings,
        }
    }
}

/// A window of the detail month.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub label: String,
    pub month_index: usize,
    pub hours: Vec<DetailRecord>,
}

impl DetailResponse {
    pub fn new(detail: &HourlyDetail, window: &DetailWindow<'_>) -> Self {
        Self {
            label: detail.label.clone(),
            month_index: detail.month_index,
            hours: window
                .hours
                .iter()
                .zip(window.cumulative_savings)
                .map(|(r, c)| DetailRecord::new(r, *c))
                .collect(),
        }
    }
}

/// Result of an ad-hoc `POST /simulate`.
#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub months: Vec<MonthlySummary>,
    pub total_savings: f64,
    pub projection: Projection,
    pub detail: Option<HourlyDetail>,
}

/// Optional range query parameters for the detail endpoint.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// Start hour (inclusive).
    pub from: Option<usize>,
    /// End hour (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Individual problems, when there is more than one.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_record_carries_cumulative_total() {
        let r = HourlyResult {
            hour: 250,
            hour_of_day: 10,
            soc_kwh: 42.0,
            net_balance: -0.5,
            gross_savings: 0.0,
            charge_cost: 0.5,
            solar_charged_kwh: 5.0,
            grid_charged_kwh: 0.0,
            discharged_kwh: 0.0,
        };
        let record = DetailRecord::new(&r, 12.5);
        assert_eq!(record.hour, 250);
        assert_eq!(record.soc_kwh, 42.0);
        assert_eq!(record.net_balance, -0.5);
        assert_eq!(record.cumulative_savings, 12.5);
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::new("bad")).unwrap();
        assert_eq!(json["error"], "bad");
        assert!(json.get("details").is_none());
    }
}
