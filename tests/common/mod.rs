//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use battery_payback::sim::types::{BatteryParams, MonthlyBillingRecord, SimulationParams};

/// The four invoice billing periods used throughout the tests.
pub fn invoice_months() -> Vec<MonthlyBillingRecord> {
    vec![
        MonthlyBillingRecord::new("Mar-Abr", 2955.0, 1940.0, 0.092, 0.129),
        MonthlyBillingRecord::new("Abr-May", 3397.0, 1708.0, 0.092, 0.130),
        MonthlyBillingRecord::new("May-Jun", 5891.0, 1352.0, 0.130, 0.172),
        MonthlyBillingRecord::new("Jun-Jul", 6563.0, 1399.0, 0.131, 0.180),
    ]
}

/// The first invoice period on its own.
pub fn mar_abr() -> MonthlyBillingRecord {
    MonthlyBillingRecord::new("Mar-Abr", 2955.0, 1940.0, 0.092, 0.129)
}

/// Default battery (100 kWh, 50 kW, 90 % round trip).
pub fn default_battery() -> BatteryParams {
    BatteryParams::new(100.0, 50.0, 0.90)
}

/// Default parameters: canonical template, exclusive charging, per-record sale price.
pub fn default_params() -> SimulationParams {
    SimulationParams::with_battery(default_battery())
}

/// Default parameters with every record sold at `sale_price`.
pub fn params_with_sale_price(sale_price: f64) -> SimulationParams {
    SimulationParams {
        sale_price_override: Some(sale_price),
        ..default_params()
    }
}
