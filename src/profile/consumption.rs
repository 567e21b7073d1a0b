use serde::{Deserialize, Serialize};

use super::types::ShapeTemplate;

/// An hour-of-day range `[start, end)` and the weight it carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBucket {
    pub start_hour: usize,
    pub end_hour: usize,
    pub weight: f64,
}

const fn bucket(start_hour: usize, end_hour: usize, weight: f64) -> WeightBucket {
    WeightBucket {
        start_hour,
        end_hour,
        weight,
    }
}

/// Hospitality day: quiet night, lunch peak, busy dinner service.
const HOSPITALITY: [WeightBucket; 5] = [
    bucket(0, 8, 0.4),
    bucket(8, 12, 0.8),
    bucket(12, 17, 2.0),
    bucket(17, 20, 0.8),
    bucket(20, 24, 1.2),
];

/// Same day with the lighter evening weight of the earlier estimate.
const HOSPITALITY_LEGACY: [WeightBucket; 5] = [
    bucket(0, 8, 0.4),
    bucket(8, 12, 0.8),
    bucket(12, 17, 2.0),
    bucket(17, 20, 0.8),
    bucket(20, 24, 1.0),
];

/// Named consumption weight sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionShape {
    /// Canonical weights `[0.4, 0.8, 2.0, 0.8, 1.2]`.
    #[default]
    Hospitality,
    /// Earlier weights `[0.4, 0.8, 2.0, 0.8, 1.0]`.
    HospitalityLegacy,
}

impl ConsumptionShape {
    /// Returns the template for this weight set.
    pub fn template(self) -> ConsumptionTemplate {
        match self {
            Self::Hospitality => ConsumptionTemplate::hospitality(),
            Self::HospitalityLegacy => ConsumptionTemplate::hospitality_legacy(),
        }
    }
}

/// Piecewise-constant consumption shape over the day.
///
/// Hours not covered by any bucket weigh zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionTemplate {
    name: &'static str,
    buckets: Vec<WeightBucket>,
}

impl ConsumptionTemplate {
    /// Creates a template from hour buckets.
    ///
    /// # Panics
    ///
    /// Panics if a bucket is empty, extends past hour 24, overlaps the
    /// previous one, or carries a negative weight.
    pub fn new(name: &'static str, buckets: Vec<WeightBucket>) -> Self {
        let mut previous_end = 0;
        for b in &buckets {
            assert!(b.start_hour < b.end_hour && b.end_hour <= 24);
            assert!(b.start_hour >= previous_end, "buckets must be ordered");
            assert!(b.weight >= 0.0);
            previous_end = b.end_hour;
        }
        Self { name, buckets }
    }

    /// The canonical hospitality template.
    pub fn hospitality() -> Self {
        Self::new("hospitality", HOSPITALITY.to_vec())
    }

    /// The hospitality template with the lighter evening weight.
    pub fn hospitality_legacy() -> Self {
        Self::new("hospitality_legacy", HOSPITALITY_LEGACY.to_vec())
    }
}

impl ShapeTemplate for ConsumptionTemplate {
    fn weight(&self, hour_of_day: usize) -> f64 {
        self.buckets
            .iter()
            .find(|b| (b.start_hour..b.end_hour).contains(&hour_of_day))
            .map_or(0.0, |b| b.weight)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
