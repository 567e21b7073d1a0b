//! Validation errors raised before a simulation starts.

use thiserror::Error;

/// Caller-contract violations detected by [`crate::sim::runner::simulate`].
///
/// Inputs are never clamped into range: the first offending field aborts
/// the run before any hour is simulated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("month \"{month}\": {field} must be >= 0, got {value}")]
    NegativeQuantity {
        month: String,
        field: &'static str,
        value: f64,
    },

    #[error("month \"{month}\": {field} must be > 0, got {value}")]
    NonPositivePrice {
        month: String,
        field: &'static str,
        value: f64,
    },

    #[error("month \"{month}\": {field} must be >= 0, got {value}")]
    NegativePrice {
        month: String,
        field: &'static str,
        value: f64,
    },

    #[error("{field} must be a finite number")]
    NonFinite { field: String },

    #[error("battery {field} must be > 0, got {value}")]
    NonPositiveBattery { field: &'static str, value: f64 },

    #[error("round-trip efficiency must be in (0, 1], got {0}")]
    EfficiencyOutOfRange(f64),

    #[error("detail month {index} is out of range for {months} month(s)")]
    DetailMonthOutOfRange { index: usize, months: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_month_and_field() {
        let err = ValidationError::NegativeQuantity {
            month: "Mar-Abr".to_string(),
            field: "consumption_kwh",
            value: -1.0,
        };
        let message = err.to_string();
        assert!(message.contains("Mar-Abr"));
        assert!(message.contains("consumption_kwh"));
    }

    #[test]
    fn efficiency_message_shows_value() {
        let err = ValidationError::EfficiencyOutOfRange(1.5);
        assert_eq!(err.to_string(), "round-trip efficiency must be in (0, 1], got 1.5");
    }
}
