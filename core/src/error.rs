use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
