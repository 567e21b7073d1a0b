use std::f64::consts::PI;

use super::types::ShapeTemplate;

/// Half-sine solar bell between sunrise and sunset.
///
/// Weight is `sin((h - sunrise) * PI / (sunset - sunrise))` for hours strictly
/// between `sunrise` and `sunset`, zero elsewhere. The default bell spans
/// 07:00 to 20:00, so generation runs from 08:00 through 19:00.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarBell {
    /// Hour at which the bell starts (exclusive).
    pub sunrise_hour: usize,
    /// Hour at which the bell ends (exclusive).
    pub sunset_hour: usize,
}

impl Default for SolarBell {
    fn default() -> Self {
        Self {
            sunrise_hour: 7,
            sunset_hour: 20,
        }
    }
}

impl SolarBell {
    /// Creates a bell over `(sunrise_hour, sunset_hour)`.
    ///
    /// # Panics
    ///
    /// Panics if `sunrise_hour >= sunset_hour` or `sunset_hour > 24`.
    pub fn new(sunrise_hour: usize, sunset_hour: usize) -> Self {
        assert!(sunrise_hour < sunset_hour && sunset_hour <= 24);
        Self {
            sunrise_hour,
            sunset_hour,
        }
    }
}

impl ShapeTemplate for SolarBell {
    fn weight(&self, hour_of_day: usize) -> f64 {
        if hour_of_day > self.sunrise_hour && hour_of_day < self.sunset_hour {
            let span = (self.sunset_hour - self.sunrise_hour) as f64;
            ((hour_of_day as f64 - self.sunrise_hour as f64) * PI / span).sin()
        } else {
            0.0
        }
    }

    fn name(&self) -> &'static str {
        "solar_bell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_outside_daylight() {
        let bell = SolarBell::default();
        for hour in (0..=7).chain(20..24) {
            assert_eq!(bell.weight(hour), 0.0, "hour {hour}");
        }
    }

    #[test]
    fn positive_during_daylight() {
        let bell = SolarBell::default();
        for hour in 8..20 {
            assert!(bell.weight(hour) > 0.0, "hour {hour}");
        }
    }

    #[test]
    fn symmetric_around_midday() {
        let bell = SolarBell::default();
        assert!((bell.weight(10) - bell.weight(17)).abs() < 1e-12);
        assert!(bell.weight(13) > bell.weight(9));
    }

    #[test]
    #[should_panic]
    fn inverted_bell_panics() {
        SolarBell::new(20, 7);
    }
}
