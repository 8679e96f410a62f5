//! # PSEI Trend
//!
//! Workspace facade for the PSEI opening-price trend forecast.
//!
//! - [`math`]: least-squares line fitting
//! - [`forecast`]: CSV loading, forecasting, comparison output and charts
//!
//! ## Example
//!
//! ```
//! use psei_trend_workspace::math::{fit_line, Observation};
//!
//! let history = [
//!     Observation::new(0, 100.0),
//!     Observation::new(1, 102.0),
//!     Observation::new(2, 104.0),
//! ];
//! let model = fit_line(&history).unwrap();
//! assert!((model.slope() - 2.0).abs() < 1e-12);
//! assert!((model.intercept() - 100.0).abs() < 1e-12);
//! ```

pub use trend_forecast as forecast;
pub use trend_math as math;
