//! End-to-end run: load, fit, forecast, write, plot

use crate::chart::ChartRenderer;
use crate::config::PipelineConfig;
use crate::data::HistoryLoader;
use crate::dates::serial_to_date_label;
use crate::error::Result;
use crate::forecaster::{forecast, ForecastPoint};
use crate::metrics::{forecast_accuracy, ForecastAccuracy};
use crate::output::write_comparison;
use tracing::{debug, info, warn};
use trend_math::{fit_line, LinearModel};

/// What a pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub model: LinearModel,
    /// R-squared of the fit over the history, when defined
    pub r_squared: Option<f64>,
    pub points: Vec<ForecastPoint>,
    pub accuracy: ForecastAccuracy,
    /// Data rows read from the input, priced or not
    pub rows_read: usize,
    /// Rows dropped because their price was missing
    pub rows_missing: usize,
    /// Whether the chart step succeeded
    pub chart_rendered: bool,
}

/// Run the whole forecast
///
/// Every step up to and including the CSV write is fatal on error. The chart
/// step is not: a failing `renderer` is logged and reported through
/// [`PipelineReport::chart_rendered`].
pub fn run_pipeline(
    config: &PipelineConfig,
    renderer: Option<&dyn ChartRenderer>,
) -> Result<PipelineReport> {
    let history = HistoryLoader::from_csv(&config.input_path)?;
    info!(
        observations = history.len(),
        missing = history.missing_count(),
        "Loaded {}",
        config.input_path.display()
    );

    let model = fit_line(history.observations())?;
    let r_squared = model.r_squared(history.observations()).ok();
    info!(
        slope = model.slope(),
        intercept = model.intercept(),
        r_squared = ?r_squared,
        "Fitted linear trend"
    );

    let points = forecast(&model, &config.forecast)?;
    for point in &points {
        // Report the serial's own calendar date, which can differ from the label
        let serial_label = serial_to_date_label(point.serial_date as f64)?;
        info!("Predicted open on {} is {}", serial_label, point.predicted_price);
        if serial_label != point.date_label {
            debug!(
                serial = point.serial_date,
                serial_label = %serial_label,
                label = %point.date_label,
                "serial date and forecast label disagree"
            );
        }
    }

    let labels: Vec<&str> = points.iter().map(|p| p.date_label.as_str()).collect();
    let predicted: Vec<f64> = points.iter().map(|p| p.predicted_price).collect();
    let actual = config.forecast.actual_for_horizon()?;

    let accuracy = forecast_accuracy(&predicted, actual)?;
    info!(
        mae = accuracy.mae,
        rmse = accuracy.rmse,
        mape = accuracy.mape,
        "Forecast accuracy against actual opens"
    );

    write_comparison(&labels, &predicted, actual, &config.output_path)?;

    let chart_rendered = match renderer {
        Some(renderer) => match renderer.render(&config.output_path, &config.image_path) {
            Ok(()) => true,
            Err(err) => {
                warn!(renderer = renderer.name(), "Chart not rendered: {}", err);
                false
            }
        },
        None => false,
    };

    Ok(PipelineReport {
        model,
        r_squared,
        points,
        accuracy,
        rows_read: history.row_serials().len(),
        rows_missing: history.missing_count(),
        chart_rendered,
    })
}
