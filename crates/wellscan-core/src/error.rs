//! Error types for Wellscan.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No well file number in filename or text: {0}")]
    MissingIdentifier(String),

    #[error("Invalid record {0}: {1}")]
    InvalidRecord(String, String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
