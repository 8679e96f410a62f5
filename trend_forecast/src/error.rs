//! Error types for the trend_forecast crate

use std::path::PathBuf;
use thiserror::Error;
use trend_math::MathError;

/// Custom error types for the trend_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Input file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Input file exists but could not be opened or read
    #[error("Cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created or written
    #[error("Cannot write {}: {source}", path.display())]
    FileUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A date field was not a valid `YYYY-MM-DD` date, or a serial was out of range
    #[error("Invalid date format: '{value}'")]
    InvalidDateFormat { value: String },

    /// A price field was neither a number nor the literal `null`
    #[error("Invalid numeric value '{value}' on line {line}")]
    InvalidNumericFormat { line: u64, value: String },

    /// The series handed to the output writer have different lengths
    #[error(
        "Length mismatch: {labels} date labels, {predicted} predicted values, {actual} actual values"
    )]
    LengthMismatch {
        labels: usize,
        predicted: usize,
        actual: usize,
    },

    /// Error from the trend fit (degenerate input and friends)
    #[error("Fit error: {0}")]
    Math(#[from] MathError),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The external plotting program could not be started
    #[error("External tool '{tool}' is unavailable: {source}")]
    ExternalToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The chart renderer started but failed to produce an image
    #[error("Chart rendering failed: {0}")]
    ChartRenderFailed(String),
}

impl ForecastError {
    /// Process exit code reported by the binary for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            ForecastError::FileNotFound { .. } => 2,
            ForecastError::FileUnreadable { .. } => 3,
            ForecastError::FileUnwritable { .. } => 4,
            ForecastError::InvalidDateFormat { .. } => 5,
            ForecastError::InvalidNumericFormat { .. } => 6,
            ForecastError::Math(_) => 7,
            ForecastError::LengthMismatch { .. } => 8,
            ForecastError::InvalidParameter(_) => 9,
            ForecastError::ExternalToolUnavailable { .. } | ForecastError::ChartRenderFailed(_) => {
                10
            }
        }
    }

    /// Whether the fit failed because the input had no usable spread
    pub fn is_degenerate_input(&self) -> bool {
        matches!(self, ForecastError::Math(MathError::DegenerateInput(_)))
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
