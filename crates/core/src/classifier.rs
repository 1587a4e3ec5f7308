//! Reading classifier: cleaning, rule labels, model labels, final labels.
//!
//! Pure logic. The caller loads raw rows and persists the result; this module
//! only turns one into the other.

use serde::Serialize;

use crate::error::CoreError;
use crate::isolation_forest::{IsolationForest, IsolationForestParams, MAX_SAMPLE_SIZE};
use crate::reading::{ClassifiedReading, RawReading, Reading};
use crate::scaling::StandardScaler;
use crate::thresholds::rule_anomaly;
use crate::types::FeatureVector;

/// Outlier model configuration used for every classifier run.
pub const MODEL_PARAMS: IsolationForestParams = IsolationForestParams {
    n_estimators: 200,
    contamination: 0.05,
    max_samples: MAX_SAMPLE_SIZE,
    seed: 42,
};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationSummary {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rule_anomalies: usize,
    pub ml_anomalies: usize,
    pub final_anomalies: usize,
}

#[derive(Debug, Clone)]
pub struct Classification {
    pub readings: Vec<ClassifiedReading>,
    pub summary: ClassificationSummary,
}

/// Drop invalid rows and sort the rest by timestamp.
///
/// The sort is stable, so readings sharing a timestamp keep input order.
pub fn clean(raw: &[RawReading]) -> Vec<Reading> {
    let mut readings: Vec<Reading> = raw.iter().filter_map(RawReading::clean).collect();
    readings.sort_by_key(|r| r.timestamp);
    readings
}

/// Model labels for cleaned readings. Fewer than two readings cannot be
/// modelled and are all labelled normal.
pub fn ml_anomalies(readings: &[Reading]) -> Result<Vec<bool>, CoreError> {
    if readings.len() < 2 {
        return Ok(vec![false; readings.len()]);
    }

    let features: Vec<FeatureVector> = readings.iter().map(Reading::features).collect();
    let scaled = StandardScaler::fit_transform(&features)?;
    IsolationForest::new(MODEL_PARAMS)?.fit_predict(&scaled)
}

/// Label cleaned, sorted readings.
pub fn classify_readings(readings: &[Reading]) -> Result<Vec<ClassifiedReading>, CoreError> {
    let ml = ml_anomalies(readings)?;
    Ok(readings
        .iter()
        .zip(ml)
        .map(|(r, ml)| ClassifiedReading::new(*r, rule_anomaly(r), ml))
        .collect())
}

/// Run the whole classification over raw input rows.
pub fn classify(raw: &[RawReading]) -> Result<Classification, CoreError> {
    let cleaned = clean(raw);
    let readings = classify_readings(&cleaned)?;
    let summary = summarize(raw.len(), &readings);
    Ok(Classification { readings, summary })
}

pub fn summarize(rows_read: usize, readings: &[ClassifiedReading]) -> ClassificationSummary {
    let count = |f: fn(&ClassifiedReading) -> bool| readings.iter().filter(|r| f(r)).count();
    ClassificationSummary {
        rows_read,
        rows_kept: readings.len(),
        rule_anomalies: count(ClassifiedReading::is_rule_anomaly),
        ml_anomalies: count(ClassifiedReading::is_ml_anomaly),
        final_anomalies: count(ClassifiedReading::is_anomaly),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
