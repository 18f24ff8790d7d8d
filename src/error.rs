//! Error handling for the resume intake pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Resume analysis error: {0}")]
    Analysis(String),

    #[error("Job match error: {0}")]
    Match(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    Store(String),

    #[error("Submission error: {0}")]
    Submission(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation already in flight: {0}")]
    OperationInFlight(String),
}

pub type Result<T> = std::result::Result<T, IntakeError>;

/// Convert reqwest errors to our custom error type
impl From<reqwest::Error> for IntakeError {
    fn from(err: reqwest::Error) -> Self {
        IntakeError::Network(err.to_string())
    }
}
