//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression test inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a test image
    #[error("failed to build image: {0}")]
    ImageBuild(#[from] bitraster_core::Error),

    /// Invalid generator parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Image comparison failed
    #[error("image comparison failed at index {index}")]
    ImageMismatch { index: usize },

    /// Byte string comparison failed
    #[error("string comparison failed at index {index}")]
    StringMismatch { index: usize },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
