//! Fixed parameters of the PSEI forecast run
//!
//! The model itself is not configurable. These constants only give names to
//! the literals the run depends on so they can be handed to the forecaster
//! and the output writer explicitly.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Epoch the loader measures historical dates from
pub const BASE_DATE: &str = "1900-01-01";

/// Days between the spreadsheet serial epoch and 1970-01-01
pub const SPREADSHEET_EPOCH_OFFSET: i64 = 25_569;

/// Days to add to a [`BASE_DATE`] difference to get a spreadsheet serial.
///
/// One day comes from serial 1 being 1900-01-01 rather than serial 0, the
/// other from the phantom 1900-02-29 of the legacy convention.
pub const SPREADSHEET_EPOCH_CORRECTION: i64 = 2;

/// Number of days forecast past the end of the history
pub const FORECAST_HORIZON: usize = 30;

/// Spreadsheet serial of the first forecast day (2024-05-01)
pub const FORECAST_START_SERIAL: i64 = 45_413;

/// Calendar (year, month, day) the forecast date labels start from
pub const FORECAST_LABEL_START: (i32, u32, u32) = (2024, 5, 1);

/// Observed PSEI opening prices for May 2024, aligned by position with the forecast days
pub const ACTUAL_OPEN: [f64; 31] = [
    6654.97, 6654.97, 6664.49, 6664.49, 6664.49, 6639.27, 6668.24, 6620.35, 6670.85, 6574.22,
    6574.22, 6574.22, 6523.88, 6601.93, 6578.65, 6589.24, 6619.51, 6619.51, 6619.51, 6633.59,
    6704.14, 6606.80, 6612.09, 6634.61, 6634.61, 6634.61, 6590.97, 6572.96, 6506.40, 6506.40,
    6506.40,
];

pub const DEFAULT_INPUT_PATH: &str = "PSEI.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "open_data.csv";
pub const DEFAULT_IMAGE_PATH: &str = "predicted_vs_actual_open.png";

/// Parameters handed to the forecaster
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    /// Number of consecutive days to forecast
    pub horizon: usize,
    /// Serial fed to the fitted line for the first forecast day
    pub start_serial: i64,
    /// Calendar date of the first forecast label
    pub label_start: NaiveDate,
    /// Observed prices compared against the forecast
    pub actual_open: Vec<f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let (year, month, day) = FORECAST_LABEL_START;
        Self {
            horizon: FORECAST_HORIZON,
            start_serial: FORECAST_START_SERIAL,
            label_start: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
            actual_open: ACTUAL_OPEN.to_vec(),
        }
    }
}

impl ForecastConfig {
    /// Actual prices for the forecast days, matched by position
    ///
    /// Extra trailing prices are ignored; too few is a [`ForecastError::LengthMismatch`].
    pub fn actual_for_horizon(&self) -> Result<&[f64]> {
        self.actual_open
            .get(..self.horizon)
            .ok_or(ForecastError::LengthMismatch {
                labels: self.horizon,
                predicted: self.horizon,
                actual: self.actual_open.len(),
            })
    }
}

/// File locations plus forecast parameters for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub image_path: PathBuf,
    pub forecast: ForecastConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            forecast: ForecastConfig::default(),
        }
    }
}
