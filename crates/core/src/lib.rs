//! Battery monitoring domain logic.
//!
//! Everything in this crate is pure (no file or network access): reading
//! cleaning, threshold rules, feature scaling, the isolation forest, and the
//! classifier that combines them. Persistence lives in `battmon-db`.

pub mod classifier;
pub mod error;
pub mod isolation_forest;
pub mod reading;
pub mod scaling;
pub mod thresholds;
pub mod types;
