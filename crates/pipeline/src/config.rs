use std::path::PathBuf;

use battmon_db::columns::{
    ColumnMapping, DEFAULT_TEMPERATURE_SOURCE, DEFAULT_TIMESTAMP_SOURCE, DEFAULT_VOLTAGE_SOURCE,
};

/// Classifier configuration loaded from environment variables.
///
/// Defaults match the file names the logger export and the query service
/// use, so a bare run in the data directory needs no configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Raw readings file (default: `HRD_Data.csv`).
    pub input_path: PathBuf,
    /// Classified output file, overwritten on every run (default: `ml_output.csv`).
    pub output_path: PathBuf,
    /// Source header names for the timestamp, voltage and temperature columns.
    pub columns: ColumnMapping,
}

impl PipelineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default            |
    /// |----------------------|--------------------|
    /// | `INPUT_PATH`         | `HRD_Data.csv`     |
    /// | `OUTPUT_PATH`        | `ml_output.csv`    |
    /// | `TIMESTAMP_COLUMN`   | `TaktTime`         |
    /// | `VOLTAGE_COLUMN`     | `Voltage`          |
    /// | `TEMPERATURE_COLUMN` | `Mosfet Body Temp` |
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        };

        Self {
            input_path: var("INPUT_PATH", "HRD_Data.csv").into(),
            output_path: var("OUTPUT_PATH", "ml_output.csv").into(),
            columns: ColumnMapping {
                timestamp: var("TIMESTAMP_COLUMN", DEFAULT_TIMESTAMP_SOURCE),
                voltage: var("VOLTAGE_COLUMN", DEFAULT_VOLTAGE_SOURCE),
                temperature: var("TEMPERATURE_COLUMN", DEFAULT_TEMPERATURE_SOURCE),
            },
        }
    }
}
