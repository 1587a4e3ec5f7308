//! End-to-end tests for the classifier batch job.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use assert_matches::assert_matches;
use battmon_db::{ColumnMapping, Dataset, DbError};
use battmon_pipeline::{run, PipelineConfig, PipelineError};
use tempfile::TempDir;

fn config(dir: &Path) -> PipelineConfig {
    PipelineConfig {
        input_path: dir.join("HRD_Data.csv"),
        output_path: dir.join("ml_output.csv"),
        columns: ColumnMapping::default(),
    }
}

/// Logger export with 120 nominal rows (written newest first), one rule
/// violation, one spike, and three rows that must be dropped.
fn logger_export() -> String {
    let mut csv = String::from("Id,TaktTime,Voltage,Mosfet Body Temp\n");
    for i in (0..120).rev() {
        let v = 50.0 + ((i % 5) as f64 - 2.0) * 0.2;
        let t = 21.0 + ((i % 3) as f64) * 0.5;
        writeln!(csv, "{i},2024-01-01 {:02}:{:02}:00,{v},{t}", i / 60, i % 60).unwrap();
    }
    csv.push_str("200,2024-01-02 00:00:00,53.0,24.0\n");
    csv.push_str("201,2024-01-02 00:01:00,75.0,70.0\n");
    csv.push_str("202,not-a-time,50.0,22.0\n");
    csv.push_str("203,2024-01-02 00:02:00,,22.0\n");
    csv.push_str("204,2024-01-02 00:03:00,50.0,hot\n");
    csv
}

// ---------------------------------------------------------------------------
// Test: full run writes sorted, labelled output without invalid rows
// ---------------------------------------------------------------------------

#[test]
fn run_writes_classified_dataset() {
    let dir = TempDir::new().unwrap();
    let cfg = config(dir.path());
    fs::write(&cfg.input_path, logger_export()).unwrap();

    let summary = run(&cfg).unwrap();

    assert_eq!(summary.rows_read, 125);
    assert_eq!(summary.rows_kept, 122);
    assert!(summary.rule_anomalies >= 2);
    assert!(summary.final_anomalies >= summary.rule_anomalies);
    assert!(summary.final_anomalies >= summary.ml_anomalies);

    let dataset = Dataset::load(&cfg.output_path).unwrap();
    assert_eq!(
        dataset.columns(),
        [
            "timestamp",
            "voltage",
            "temperature",
            "rule_anomaly",
            "ml_anomaly",
            "final_anomaly"
        ]
    );
    assert_eq!(dataset.len(), 122);

    let timestamps: Vec<&str> = dataset
        .rows()
        .iter()
        .map(|r| r["timestamp"].as_str().unwrap())
        .collect();
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));

    let spike = dataset
        .rows()
        .iter()
        .find(|r| r["voltage"] == 75.0)
        .unwrap();
    assert_eq!(spike["rule_anomaly"], 1);
    assert_eq!(spike["ml_anomaly"], 1);
    assert_eq!(spike["final_anomaly"], 1);

    assert_eq!(dataset.anomalies().count(), summary.final_anomalies);
}

// ---------------------------------------------------------------------------
// Test: missing input aborts without writing output
// ---------------------------------------------------------------------------

#[test]
fn missing_input_is_fatal_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let cfg = config(dir.path());

    let result = run(&cfg);

    assert_matches!(result, Err(PipelineError::Db(DbError::Open { .. })));
    assert!(!cfg.output_path.exists());
}

// ---------------------------------------------------------------------------
// Test: custom column names are honoured
// ---------------------------------------------------------------------------

#[test]
fn custom_column_mapping() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(dir.path());
    cfg.columns = ColumnMapping {
        timestamp: "time".into(),
        voltage: "pack_v".into(),
        temperature: "fet_c".into(),
    };
    fs::write(
        &cfg.input_path,
        "time,pack_v,fet_c\n2024-01-01T00:00:00,50,24\n2024-01-01T00:00:01,50,26\n",
    )
    .unwrap();

    let summary = run(&cfg).unwrap();

    assert_eq!(summary.rows_kept, 2);
    let dataset = Dataset::load(&cfg.output_path).unwrap();
    assert_eq!(dataset.rows()[0]["rule_anomaly"], 0);
    assert_eq!(dataset.rows()[1]["rule_anomaly"], 1);
}

// ---------------------------------------------------------------------------
// Test: exports in other common timestamp layouts are kept
// ---------------------------------------------------------------------------

#[test]
fn alternate_timestamp_layouts_are_kept() {
    let dir = TempDir::new().unwrap();
    let cfg = config(dir.path());
    fs::write(
        &cfg.input_path,
        "TaktTime,Voltage,Mosfet Body Temp\n\
         2024/01/01 00:00:03,50,22\n\
         20240101 00:00:02,50,22\n\
         Jan 1 2024 00:00:01,50,22\n\
         12/31/2023,50,22\n",
    )
    .unwrap();

    let summary = run(&cfg).unwrap();

    assert_eq!(summary.rows_read, 4);
    assert_eq!(summary.rows_kept, 4);
    let dataset = Dataset::load(&cfg.output_path).unwrap();
    let timestamps: Vec<_> = dataset
        .rows()
        .iter()
        .map(|row| row["timestamp"].clone())
        .collect();
    assert_eq!(
        timestamps,
        vec![
            "2023-12-31 00:00:00",
            "2024-01-01 00:00:01",
            "2024-01-01 00:00:02",
            "2024-01-01 00:00:03",
        ]
    );
}
