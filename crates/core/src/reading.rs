//! Telemetry readings and the row-level cleaning rules.
//!
//! A [`RawReading`] holds the three cells exactly as they appeared in the
//! input file. [`RawReading::clean`] turns it into a [`Reading`] or rejects
//! it; rejected rows are dropped by the caller without further reporting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

use crate::types::{FeatureVector, Flag, Timestamp};

/// Naive formats tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%Y%m%d %H:%M:%S%.f",
    "%Y%m%dT%H:%M:%S%.f",
    "%b %d %Y %H:%M:%S%.f",
    "%d %b %Y %H:%M:%S%.f",
];

/// Date-only fallbacks, interpreted as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d", "%b %d %Y"];

/// Output timestamp formats. Fractions are written as microseconds and only
/// when non-zero.
const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const OUTPUT_FORMAT_FRACTIONAL: &str = "%Y-%m-%d %H:%M:%S%.6f";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One input row before validation. `None` marks a cell missing from a
/// short row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReading {
    pub timestamp: Option<String>,
    pub voltage: Option<String>,
    pub temperature: Option<String>,
}

/// A validated telemetry sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub timestamp: Timestamp,
    pub voltage: f64,
    pub temperature: f64,
}

/// A reading plus its three anomaly labels, as persisted in the output
/// dataset. Field order is the output column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifiedReading {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: Timestamp,
    pub voltage: f64,
    pub temperature: f64,
    pub rule_anomaly: Flag,
    pub ml_anomaly: Flag,
    pub final_anomaly: Flag,
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

impl RawReading {
    pub fn new(
        timestamp: impl Into<String>,
        voltage: impl Into<String>,
        temperature: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            voltage: Some(voltage.into()),
            temperature: Some(temperature.into()),
        }
    }

    /// Parse the timestamp and coerce both features.
    ///
    /// Returns `None` when any of the three fails; the row is then dropped.
    pub fn clean(&self) -> Option<Reading> {
        let timestamp = parse_timestamp(self.timestamp.as_deref()?)?;
        let voltage = coerce_numeric(self.voltage.as_deref()?)?;
        let temperature = coerce_numeric(self.temperature.as_deref()?)?;
        Some(Reading {
            timestamp,
            voltage,
            temperature,
        })
    }
}

impl Reading {
    pub fn features(&self) -> FeatureVector {
        [self.voltage, self.temperature]
    }
}

impl ClassifiedReading {
    pub fn new(reading: Reading, rule_anomaly: bool, ml_anomaly: bool) -> Self {
        Self {
            timestamp: reading.timestamp,
            voltage: reading.voltage,
            temperature: reading.temperature,
            rule_anomaly: Flag::from(rule_anomaly),
            ml_anomaly: Flag::from(ml_anomaly),
            final_anomaly: Flag::from(rule_anomaly || ml_anomaly),
        }
    }

    pub fn is_rule_anomaly(&self) -> bool {
        self.rule_anomaly == 1
    }

    pub fn is_ml_anomaly(&self) -> bool {
        self.ml_anomaly == 1
    }

    pub fn is_anomaly(&self) -> bool {
        self.final_anomaly == 1
    }
}

/// Parse a timestamp cell. Offset-bearing values are converted to UTC.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Coerce a feature cell to a finite `f64`.
pub fn coerce_numeric(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub fn format_timestamp(ts: &Timestamp) -> String {
    let fmt = if ts.nanosecond() == 0 {
        OUTPUT_FORMAT
    } else {
        OUTPUT_FORMAT_FRACTIONAL
    };
    ts.format(fmt).to_string()
}

fn serialize_timestamp<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
