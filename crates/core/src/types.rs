/// Reading timestamps are naive wall-clock instants; offset-bearing inputs
/// are normalized to UTC before the offset is dropped.
pub type Timestamp = chrono::NaiveDateTime;

/// Binary anomaly label as persisted in the output dataset (`0` or `1`).
pub type Flag = u8;

/// Two-feature vector `[voltage, temperature]` fed to the scaler and model.
pub type FeatureVector = [f64; 2];
