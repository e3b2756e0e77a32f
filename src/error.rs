use thiserror::Error;

/// Failures of a score operation, as reported to the caller
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Startup not found: {0}")]
    StartupNotFound(String),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}
