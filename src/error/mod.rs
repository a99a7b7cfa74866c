//! # Error Module
//!
//! Error types for the duplicate value counter.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Never report a failure as zero** - an empty dataset or an oversized
//!   range is a distinct outcome, not a count
//! - **Include context** - spans, ceilings, line numbers
//! - **Recovery hints** - say which fallback applies when there is one

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DuplicateCounterError {
    #[error("Counting error: {0}")]
    Count(#[from] CountError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Cross-check mismatch: histogram predicts {expected}, brute force found {actual}")]
    Mismatch { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

/// Errors produced by the counting engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountError {
    #[error("Dataset is empty; there is no value range to scan")]
    EmptyDataset,

    #[error(
        "Histogram of {span} slots exceeds the ceiling of {max_slots}. \
         Use the sorted or brute-force counter instead."
    )]
    Allocation { span: u128, max_slots: usize },

    #[error("Value range spans {span} slots, which cannot be addressed on this platform")]
    RangeOverflow { span: u128 },

    #[error("Invalid value range: min {min} is greater than max {max}")]
    InvertedRange { min: i128, max: i128 },

    #[error("Value {value} lies outside the range [{min}, {max}]")]
    ValueOutOfRange { value: i128, min: i128, max: i128 },

    #[error("Counting was cancelled")]
    Cancelled,
}

impl CountError {
    /// Whether a range-independent counter can still answer the question
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CountError::Allocation { .. } | CountError::RangeOverflow { .. }
        )
    }
}

/// Errors that occur while loading or generating a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid integer {token:?} at line {line} of {path}")]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("Invalid value bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: i64, max: i64 },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DuplicateCounterError>;
