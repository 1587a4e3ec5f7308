//! In-memory snapshot of a classified dataset, as served by the query API.
//!
//! Rows are kept as ordered column → value maps so they serialize back out
//! with the file's own column order and whatever columns the file carries.

use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::DbError;

/// Column the anomaly listing filters on.
pub const FINAL_ANOMALY_COLUMN: &str = "final_anomaly";

/// One dataset row: column name → inferred value, in file column order.
pub type Record = IndexMap<String, Value>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Read a classified dataset file in full.
    pub fn load(path: &Path) -> Result<Self, DbError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|source| DbError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_reader(reader)
    }

    pub fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self, DbError> {
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Record = columns
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), infer_value(record.get(i).unwrap_or(""))))
                .collect();
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose `final_anomaly` is `1`, in file order.
    pub fn anomalies(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().filter(|row| is_flagged(row))
    }
}

fn is_flagged(row: &Record) -> bool {
    match row.get(FINAL_ANOMALY_COLUMN) {
        Some(Value::Number(n)) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Infer a JSON value from a cell: integer, then float, then string.
/// Empty and non-finite cells become `null`.
pub fn infer_value(cell: &str) -> Value {
    let cell = cell.trim();
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = cell.parse::<f64>() {
        return serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number);
    }
    Value::String(cell.to_string())
}
