//! Error types shared by repository implementations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataframe error: {0}")]
    DataFrame(#[from] polars::error::PolarsError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("vector index error: {0}")]
    VectorIndex(String),
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
