//! Fixed-threshold rule set for battery readings.
//!
//! Pure logic. The bounds are compile-time constants and never change at
//! runtime; a reading is a rule anomaly when any feature leaves its bounds.

use crate::reading::Reading;

// ---------------------------------------------------------------------------
// Feature names
// ---------------------------------------------------------------------------

/// Pack voltage in volts.
pub const FEATURE_VOLTAGE: &str = "voltage";
/// MOSFET body temperature in degrees Celsius.
pub const FEATURE_TEMPERATURE: &str = "temperature";

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Inclusive normal range for one feature. A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// A threshold definition keyed by feature name.
#[derive(Debug, Clone, Copy)]
pub struct FeatureThreshold {
    pub feature: &'static str,
    pub bounds: FeatureBounds,
}

pub const THRESHOLDS: &[FeatureThreshold] = &[
    FeatureThreshold {
        feature: FEATURE_VOLTAGE,
        bounds: FeatureBounds {
            min: Some(48.0),
            max: Some(52.0),
        },
    },
    FeatureThreshold {
        feature: FEATURE_TEMPERATURE,
        bounds: FeatureBounds {
            min: None,
            max: Some(25.0),
        },
    },
];

impl FeatureBounds {
    /// `true` when `value` is strictly below `min` or strictly above `max`.
    pub fn violated_by(&self, value: f64) -> bool {
        self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max)
    }
}

fn feature_value(reading: &Reading, feature: &str) -> Option<f64> {
    match feature {
        FEATURE_VOLTAGE => Some(reading.voltage),
        FEATURE_TEMPERATURE => Some(reading.temperature),
        _ => None,
    }
}

/// Evaluate the rule set against one reading.
pub fn rule_anomaly(reading: &Reading) -> bool {
    THRESHOLDS.iter().any(|t| {
        feature_value(reading, t.feature).is_some_and(|value| t.bounds.violated_by(value))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
