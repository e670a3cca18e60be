use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinScoreError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Invalid Input: different bin counts (reference {reference}, candidate {candidate})")]
    BinCountMismatch { reference: usize, candidate: usize },

    #[error("Invalid Input: offset {offset} must be smaller than the bin count {bin_count}")]
    OffsetOutOfRange { offset: usize, bin_count: usize },
}

impl BinScoreError {
    /// True for caller contract violations detected before any bin is read.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            BinScoreError::BinCountMismatch { .. } | BinScoreError::OffsetOutOfRange { .. }
        )
    }
}

pub type BsResult<T> = Result<T, BinScoreError>;
