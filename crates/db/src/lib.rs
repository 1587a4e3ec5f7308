//! File-backed dataset store.
//!
//! The input readings and the classified output both live in CSV files.
//! This crate owns reading and writing them so neither the classifier nor
//! the query service touches `csv` directly.

pub mod columns;
pub mod dataset;
pub mod error;
pub mod readings;

pub use columns::ColumnMapping;
pub use dataset::{Dataset, Record};
pub use error::DbError;
pub use readings::{load_raw_readings, write_classified, RawDataset};
