//! Extrapolating a fitted trend over future days

use crate::config::ForecastConfig;
use crate::dates::format_date_label;
use crate::error::{ForecastError, Result};
use chrono::Days;
use serde::Serialize;
use trend_math::LinearModel;

/// One forecast day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Serial fed to the fitted line
    pub serial_date: i64,
    /// Value of the fitted line at `serial_date`
    pub predicted_price: f64,
    /// `MM/DD/YYYY` label, counted from the configured label start
    pub date_label: String,
}

/// Apply `model` to `config.horizon` consecutive serials starting at `config.start_serial`
///
/// Labels are generated from `config.label_start` on their own and are never
/// derived from the serials, so they do not have to agree with
/// [`serial_to_date_label`](crate::dates::serial_to_date_label).
pub fn forecast(model: &LinearModel, config: &ForecastConfig) -> Result<Vec<ForecastPoint>> {
    if config.horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "Forecast horizon must be positive".to_string(),
        ));
    }

    let mut points = Vec::with_capacity(config.horizon);
    for offset in 0..config.horizon {
        let serial_date = config.start_serial + offset as i64;
        let label_date = config
            .label_start
            .checked_add_days(Days::new(offset as u64))
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Forecast label {} days after {} is out of range",
                    offset, config.label_start
                ))
            })?;

        points.push(ForecastPoint {
            serial_date,
            predicted_price: model.predict(serial_date as f64),
            date_label: format_date_label(label_date),
        });
    }

    Ok(points)
}
