//! Input column mapping.
//!
//! Source files name their columns after the logger that produced them
//! (`TaktTime`, `Voltage`, `Mosfet Body Temp`). Each canonical column is
//! looked up by its configured source name first, then by its canonical
//! name, so already-normalized files load as well.

use battmon_core::thresholds::{FEATURE_TEMPERATURE, FEATURE_VOLTAGE};

use crate::error::DbError;

pub const COLUMN_TIMESTAMP: &str = "timestamp";

pub const DEFAULT_TIMESTAMP_SOURCE: &str = "TaktTime";
pub const DEFAULT_VOLTAGE_SOURCE: &str = "Voltage";
pub const DEFAULT_TEMPERATURE_SOURCE: &str = "Mosfet Body Temp";

/// Source header name for each canonical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub timestamp: String,
    pub voltage: String,
    pub temperature: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            timestamp: DEFAULT_TIMESTAMP_SOURCE.to_string(),
            voltage: DEFAULT_VOLTAGE_SOURCE.to_string(),
            temperature: DEFAULT_TEMPERATURE_SOURCE.to_string(),
        }
    }
}

/// Header positions of the three canonical columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub timestamp: usize,
    pub voltage: usize,
    pub temperature: usize,
}

impl ColumnMapping {
    pub fn resolve(&self, headers: &csv::StringRecord) -> Result<ColumnIndices, DbError> {
        Ok(ColumnIndices {
            timestamp: find_column(headers, COLUMN_TIMESTAMP, &self.timestamp)?,
            voltage: find_column(headers, FEATURE_VOLTAGE, &self.voltage)?,
            temperature: find_column(headers, FEATURE_TEMPERATURE, &self.temperature)?,
        })
    }
}

fn find_column(
    headers: &csv::StringRecord,
    canonical: &'static str,
    source: &str,
) -> Result<usize, DbError> {
    [source, canonical]
        .iter()
        .find_map(|name| headers.iter().position(|h| h == *name))
        .ok_or_else(|| DbError::MissingColumn {
            column: canonical,
            candidates: format!("'{source}', '{canonical}'"),
        })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn headers(names: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(names.to_vec())
    }

    #[test]
    fn resolves_logger_headers() {
        let h = headers(&["Id", "TaktTime", "Current", "Voltage", "Mosfet Body Temp"]);
        let idx = ColumnMapping::default().resolve(&h).unwrap();
        assert_eq!(
            idx,
            ColumnIndices {
                timestamp: 1,
                voltage: 3,
                temperature: 4,
            }
        );
    }

    #[test]
    fn falls_back_to_canonical_headers() {
        let h = headers(&["temperature", "voltage", "timestamp"]);
        let idx = ColumnMapping::default().resolve(&h).unwrap();
        assert_eq!((idx.timestamp, idx.voltage, idx.temperature), (2, 1, 0));
    }

    #[test]
    fn source_name_wins_over_canonical() {
        let h = headers(&["timestamp", "TaktTime", "voltage", "temperature"]);
        let idx = ColumnMapping::default().resolve(&h).unwrap();
        assert_eq!(idx.timestamp, 1);
    }

    #[test]
    fn missing_column_is_reported() {
        let h = headers(&["TaktTime", "Voltage"]);
        assert_matches!(
            ColumnMapping::default().resolve(&h),
            Err(DbError::MissingColumn {
                column: "temperature",
                ..
            })
        );
    }
}
