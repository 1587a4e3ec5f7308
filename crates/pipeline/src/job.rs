use battmon_core::classifier::{self, ClassificationSummary};
use battmon_db::{load_raw_readings, write_classified};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

/// Run one classification pass: load, clean, label, save.
///
/// The output file is only opened once classification has succeeded, so a
/// fatal input error leaves any previous output untouched.
pub fn run(config: &PipelineConfig) -> Result<ClassificationSummary, PipelineError> {
    let raw = load_raw_readings(&config.input_path, &config.columns)?;
    tracing::info!(
        path = %config.input_path.display(),
        columns = ?raw.columns,
        rows = raw.readings.len(),
        "Loaded input readings"
    );

    let classification = classifier::classify(&raw.readings)?;
    let summary = classification.summary;
    tracing::info!(rows = summary.rows_kept, "Readings after cleaning");

    write_classified(&config.output_path, &classification.readings)?;

    tracing::info!(
        rule_anomalies = summary.rule_anomalies,
        ml_anomalies = summary.ml_anomalies,
        final_anomalies = summary.final_anomalies,
        path = %config.output_path.display(),
        "Classification complete"
    );

    Ok(summary)
}
