//! Raw reading input and classified reading output.

use std::path::Path;

use battmon_core::reading::{ClassifiedReading, RawReading};

use crate::columns::ColumnMapping;
use crate::error::DbError;

/// Raw rows as loaded from an input file, plus the file's header names.
#[derive(Debug, Clone)]
pub struct RawDataset {
    pub columns: Vec<String>,
    pub readings: Vec<RawReading>,
}

/// Load every data row of the input file.
///
/// Rows are returned uncleaned; short rows yield `None` cells and rows that
/// are not valid UTF-8 yield an all-`None` reading, so both are dropped by
/// cleaning without aborting the load. A missing file or a missing required
/// column is an error.
pub fn load_raw_readings(path: &Path, mapping: &ColumnMapping) -> Result<RawDataset, DbError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|source| DbError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader.headers()?.clone();
    let idx = mapping.resolve(&headers)?;

    let mut readings = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => {
                readings.push(RawReading::default());
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let cell = |i: usize| record.get(i).map(str::to_string);
        readings.push(RawReading {
            timestamp: cell(idx.timestamp),
            voltage: cell(idx.voltage),
            temperature: cell(idx.temperature),
        });
    }

    tracing::debug!(path = %path.display(), rows = readings.len(), "Loaded raw readings");

    Ok(RawDataset {
        columns: headers.iter().map(str::to_string).collect(),
        readings,
    })
}

/// Write classified readings, replacing any existing file at `path`.
///
/// Columns: `timestamp,voltage,temperature,rule_anomaly,ml_anomaly,final_anomaly`.
pub fn write_classified(path: &Path, readings: &[ClassifiedReading]) -> Result<(), DbError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    // Explicit header so an empty run still produces one.
    writer.write_record(OUTPUT_COLUMNS)?;
    for reading in readings {
        writer.serialize(reading)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = readings.len(), "Wrote classified readings");
    Ok(())
}

/// Output header. Matches the field order of [`ClassifiedReading`].
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "timestamp",
    "voltage",
    "temperature",
    "rule_anomaly",
    "ml_anomaly",
    "final_anomaly",
];
