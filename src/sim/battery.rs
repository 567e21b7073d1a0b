use super::types::BatteryParams;

/// A battery whose state of charge is tracked in stored (DC-side) kWh.
///
/// Round-trip losses are split evenly between the two directions: charging
/// stores `sqrt(efficiency)` of the energy absorbed, and delivering energy
/// drains `1 / sqrt(efficiency)` of it from storage. A full charge followed
/// by a full discharge therefore returns exactly `efficiency` of the input.
///
/// State of charge stays within `[0, capacity]`: requests are clamped to the
/// available headroom or stored energy, never rejected.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Usable capacity in kWh.
    pub capacity_kwh: f64,

    /// Most energy that can move in or out in one hour (kWh).
    pub power_kw: f64,

    /// Round-trip efficiency (0..=1.0).
    pub round_trip_efficiency: f64,

    /// One-way efficiency, `sqrt(round_trip_efficiency)`.
    one_way_efficiency: f64,

    /// Stored energy in kWh.
    soc_kwh: f64,
}

impl Battery {
    /// Creates an empty battery.
    ///
    /// # Panics
    ///
    /// Panics if capacity or power is not positive, or efficiency is outside `(0, 1]`.
    /// Callers validate [`BatteryParams`] first.
    pub fn new(params: &BatteryParams) -> Self {
        assert!(params.capacity_kwh > 0.0);
        assert!(params.power_kw > 0.0);
        assert!(params.round_trip_efficiency > 0.0 && params.round_trip_efficiency <= 1.0);

        Self {
            capacity_kwh: params.capacity_kwh,
            power_kw: params.power_kw,
            round_trip_efficiency: params.round_trip_efficiency,
            one_way_efficiency: params.round_trip_efficiency.sqrt(),
            soc_kwh: 0.0,
        }
    }

    /// Stored energy in kWh.
    pub fn soc_kwh(&self) -> f64 {
        self.soc_kwh
    }

    /// Room left before the battery is full, in kWh.
    pub fn headroom_kwh(&self) -> f64 {
        self.capacity_kwh - self.soc_kwh
    }

    /// Energy the battery could deliver right now, ignoring the power limit.
    pub fn deliverable_kwh(&self) -> f64 {
        self.soc_kwh * self.one_way_efficiency
    }

    /// Empties the battery.
    pub fn reset(&mut self) {
        self.soc_kwh = 0.0;
    }

    /// Absorbs up to `offered_kwh`, limited by headroom and `budget_kwh`.
    ///
    /// Returns the energy absorbed from the source; storage grows by that
    /// amount times the one-way efficiency.
    pub fn charge(&mut self, offered_kwh: f64, budget_kwh: f64) -> f64 {
        let absorbed = offered_kwh
            .min(self.headroom_kwh())
            .min(budget_kwh)
            .max(0.0);
        self.soc_kwh = (self.soc_kwh + absorbed * self.one_way_efficiency).min(self.capacity_kwh);
        absorbed
    }

    /// Delivers up to `demand_kwh`, limited by stored energy and the power limit.
    ///
    /// Returns the energy delivered; storage shrinks by that amount divided
    /// by the one-way efficiency.
    pub fn discharge(&mut self, demand_kwh: f64) -> f64 {
        let delivered = demand_kwh
            .min(self.deliverable_kwh())
            .min(self.power_kw)
            .max(0.0);
        self.soc_kwh = (self.soc_kwh - delivered / self.one_way_efficiency).max(0.0);
        delivered
    }
}
