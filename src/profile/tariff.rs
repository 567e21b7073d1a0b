use serde::Serialize;

/// First hour of the peak period; hours before it are off-peak.
pub const OFF_PEAK_END_HOUR: usize = 8;

/// Two-period time-of-use tariff: off-peak overnight, peak otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TouTariff {
    /// Price per kWh during off-peak hours.
    pub off_peak_price: f64,
    /// Price per kWh during peak hours.
    pub peak_price: f64,
}

impl TouTariff {
    pub fn new(off_peak_price: f64, peak_price: f64) -> Self {
        Self {
            off_peak_price,
            peak_price,
        }
    }

    /// Returns `true` if the hour of day falls in the off-peak period.
    pub fn is_off_peak(hour_of_day: usize) -> bool {
        hour_of_day < OFF_PEAK_END_HOUR
    }

    /// Purchase price for the hour of day.
    pub fn price_at(&self, hour_of_day: usize) -> f64 {
        if Self::is_off_peak(hour_of_day) {
            self.off_peak_price
        } else {
            self.peak_price
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_peak_before_eight() {
        assert!(TouTariff::is_off_peak(0));
        assert!(TouTariff::is_off_peak(7));
        assert!(!TouTariff::is_off_peak(8));
        assert!(!TouTariff::is_off_peak(23));
    }

    #[test]
    fn price_follows_period() {
        let tariff = TouTariff::new(0.092, 0.129);
        assert_eq!(tariff.price_at(3), 0.092);
        assert_eq!(tariff.price_at(8), 0.129);
        assert_eq!(tariff.price_at(22), 0.129);
    }
}
