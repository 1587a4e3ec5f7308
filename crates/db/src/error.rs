use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("Missing required column '{column}' (looked for: {candidates})")]
    MissingColumn {
        column: &'static str,
        candidates: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
