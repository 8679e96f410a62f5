//! Ordinary least squares trend fitting
//!
//! The fit works on raw sums rather than centred values:
//!
//! ```text
//! slope     = (n·Sxy − Sx·Sy) / (n·Sxx − Sx²)
//! intercept = ȳ − slope·x̄
//! ```

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// A single historical data point: a serial day number and the price seen on it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Day offset from the loader's epoch
    pub serial_date: i64,
    /// Opening price on that day
    pub open_price: f64,
}

impl Observation {
    /// Create a new observation
    pub fn new(serial_date: i64, open_price: f64) -> Self {
        Self {
            serial_date,
            open_price,
        }
    }
}

/// Fitted straight line `y = slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    slope: f64,
    intercept: f64,
    n: usize,
}

impl LinearModel {
    /// Get the slope (price change per day)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the intercept (price at serial day zero)
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of observations the model was fitted on
    pub fn sample_size(&self) -> usize {
        self.n
    }

    /// Evaluate the line at serial day `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Get the R-squared value (coefficient of determination) over `observations`
    pub fn r_squared(&self, observations: &[Observation]) -> Result<f64> {
        if observations.len() < 2 {
            return Err(MathError::InsufficientData(
                "Not enough data to calculate R-squared. Need at least 2 points.".to_string(),
            ));
        }

        let y_mean =
            observations.iter().map(|o| o.open_price).sum::<f64>() / observations.len() as f64;

        let mut ss_total = 0.0; // total sum of squares
        let mut ss_residual = 0.0; // residual sum of squares

        for obs in observations {
            let y_pred = self.predict(obs.serial_date as f64);
            ss_total += (obs.open_price - y_mean).powi(2);
            ss_residual += (obs.open_price - y_pred).powi(2);
        }

        if ss_total.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate R-squared: total sum of squares is too small".to_string(),
            ));
        }

        Ok(1.0 - (ss_residual / ss_total))
    }
}

/// Fit a least-squares line through `observations`
///
/// Fails with [`MathError::DegenerateInput`] when fewer than two points are
/// given or when every `serial_date` is the same, since the slope is
/// undefined in both cases.
pub fn fit_line(observations: &[Observation]) -> Result<LinearModel> {
    if observations.len() < 2 {
        return Err(MathError::DegenerateInput(format!(
            "need at least 2 observations, got {}",
            observations.len()
        )));
    }

    let n = observations.len() as f64;
    let (mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0);
    for obs in observations {
        let x = obs.serial_date as f64;
        let y = obs.open_price;
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }

    let denominator = n * sxx - sx * sx;
    // Anything below one ulp of n·Sxx is cancellation noise, not spread in x.
    if !(denominator > f64::EPSILON * n * sxx) {
        return Err(MathError::DegenerateInput(
            "serial dates have no spread, slope is undefined".to_string(),
        ));
    }

    let slope = (n * sxy - sx * sy) / denominator;
    let intercept = sy / n - slope * (sx / n);

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(MathError::DegenerateInput(format!(
            "fit produced non-finite parameters (slope={}, intercept={})",
            slope, intercept
        )));
    }

    Ok(LinearModel {
        slope,
        intercept,
        n: observations.len(),
    })
}
