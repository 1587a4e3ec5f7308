use battmon_core::error::CoreError;
use battmon_db::DbError;

/// Fatal classifier run errors. Row-level problems never surface here.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
