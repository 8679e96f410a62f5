//! Metrics for evaluating forecast performance

use crate::error::{ForecastError, Result};

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
    /// Share of day-to-day moves whose direction the forecast got right, in percent
    pub direction_accuracy: f64,
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() {
        return Err(ForecastError::LengthMismatch {
            labels: forecast.len(),
            predicted: forecast.len(),
            actual: actual.len(),
        });
    }
    if forecast.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Forecast and actual values must be non-empty".to_string(),
        ));
    }

    let n = forecast.len() as f64;

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual)
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    // Days with a zero actual have no percentage error and are not counted
    let percentage_errors: Vec<f64> = actual
        .iter()
        .zip(&errors)
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
        .collect();
    let mape = if percentage_errors.is_empty() {
        0.0
    } else {
        percentage_errors.iter().sum::<f64>() / percentage_errors.len() as f64
    };

    let smape = actual
        .iter()
        .zip(forecast)
        .map(|(&a, &f)| {
            let denom = a.abs() + f.abs();
            if denom == 0.0 {
                0.0
            } else {
                200.0 * (a - f).abs() / denom
            }
        })
        .sum::<f64>()
        / n;

    // Flat days on either side carry no direction and are left out
    let moves: Vec<bool> = forecast
        .windows(2)
        .zip(actual.windows(2))
        .filter(|(f, a)| (f[1] - f[0]).abs() > 1e-10 && (a[1] - a[0]).abs() > 1e-10)
        .map(|(f, a)| (f[1] > f[0]) == (a[1] > a[0]))
        .collect();
    let direction_accuracy = if moves.is_empty() {
        0.0
    } else {
        moves.iter().filter(|&&correct| correct).count() as f64 / moves.len() as f64 * 100.0
    };

    Ok(ForecastAccuracy {
        mae,
        mse,
        rmse,
        mape,
        smape,
        direction_accuracy,
    })
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        writeln!(f, "  Direction: {:.2}%", self.direction_accuracy)?;
        Ok(())
    }
}
