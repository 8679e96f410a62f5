//! # Trend Forecast
//!
//! Fits a straight line to historical index opening prices and extrapolates
//! it over a fixed forecast window.
//!
//! ## Features
//!
//! - Loading a daily price history from CSV, skipping days marked `null`
//! - Ordinary least squares fit (via `trend_math`)
//! - Forecasting a fixed horizon and comparing against observed prices
//! - Writing the comparison CSV and rendering it as a chart
//!
//! ## Quick Start
//!
//! ```no_run
//! use trend_forecast::chart::GnuplotRenderer;
//! use trend_forecast::config::PipelineConfig;
//! use trend_forecast::pipeline::run_pipeline;
//!
//! let config = PipelineConfig::default();
//! let report = run_pipeline(&config, Some(&GnuplotRenderer::default()))?;
//! println!("slope per day: {}", report.model.slope());
//! # Ok::<(), trend_forecast::ForecastError>(())
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod dates;
pub mod error;
pub mod forecaster;
pub mod metrics;
pub mod output;
pub mod pipeline;

// Re-export commonly used types
pub use crate::chart::{ChartRenderer, GnuplotRenderer, PlottersRenderer};
pub use crate::config::{ForecastConfig, PipelineConfig};
pub use crate::data::{load_observations, History, HistoryLoader};
pub use crate::error::ForecastError;
pub use crate::forecaster::{forecast, ForecastPoint};
pub use crate::output::{write_comparison, ComparisonRow};
pub use crate::pipeline::{run_pipeline, PipelineReport};
pub use trend_math::{fit_line, LinearModel, Observation};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
