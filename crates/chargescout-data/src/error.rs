//! Error types for dataset loading.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read dataset {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Dataset {path} has no {column} column")]
    MissingColumn { path: PathBuf, column: String },
}

pub type Result<T> = std::result::Result<T, DataError>;
