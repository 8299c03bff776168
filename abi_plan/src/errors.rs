use std::path::PathBuf;
use thiserror::Error;

pub type PlanResult<T> = Result<T, PlanError>;

/* Errors raised while reading build-info and deployment inputs */
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl PlanError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlanError::Io {
            path: path.into(),
            source,
        }
    }
}
