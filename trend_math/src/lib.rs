//! # Trend Math
//!
//! Numerical building blocks for trend forecasting.
//! This crate provides the observation type used across the workspace and a
//! closed-form ordinary least squares line fit over it.

use thiserror::Error;

pub mod regression;

pub use regression::{fit_line, LinearModel, Observation};

/// Errors that can occur while fitting a trend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Degenerate input, fit is undefined: {0}")]
    DegenerateInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trend math operations
pub type Result<T> = std::result::Result<T, MathError>;
