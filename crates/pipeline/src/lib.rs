//! Classifier batch job.
//!
//! Loads raw battery readings, labels them with the threshold rules and the
//! outlier model, and writes the augmented dataset for the query service.

pub mod config;
pub mod error;
pub mod job;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use job::run;
