//! Loading historical prices from CSV

use crate::config::BASE_DATE;
use crate::dates::date_to_serial;
use crate::error::{ForecastError, Result};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;
use trend_math::Observation;

/// Column holding the trading date
pub const DATE_COLUMN: usize = 0;

/// Column holding the price used for the fit
pub const PRICE_COLUMN: usize = 4;

/// Price text marking a day without a quote
pub const MISSING_PRICE: &str = "null";

/// Historical series as read from the input file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    /// Rows with a price, in file order
    observations: Vec<Observation>,
    /// Serial of every data row, priced or not, in file order
    row_serials: Vec<i64>,
}

impl History {
    /// Observations usable for fitting
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Serial dates of every data row, including rows with a missing price.
    ///
    /// This is not index-aligned with [`History::observations`] once a
    /// missing price has been skipped.
    pub fn row_serials(&self) -> &[i64] {
        &self.row_serials
    }

    /// Number of data rows whose price was missing
    pub fn missing_count(&self) -> usize {
        self.row_serials.len() - self.observations.len()
    }

    /// Consume the history, keeping only the observations
    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Check if there are no usable observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Get the number of usable observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }
}

/// Data loader for historical price files
#[derive(Debug)]
pub struct HistoryLoader;

impl HistoryLoader {
    /// Load a history from a CSV file
    ///
    /// The first line is always skipped as a header. Dates are taken from the
    /// first column and prices from the fifth; rows whose price is `null`
    /// still contribute their date to [`History::row_serials`].
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<History> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ForecastError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ForecastError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let history = Self::read_history(file, path)?;
        debug!(
            path = %path.display(),
            rows = history.row_serials.len(),
            observations = history.observations.len(),
            "loaded price history"
        );
        Ok(history)
    }

    fn read_history<R: Read>(reader: R, path: &Path) -> Result<History> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut history = History::default();
        for record in reader.records() {
            let record = record.map_err(|err| unreadable(path, err))?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let date = record.get(DATE_COLUMN).unwrap_or_default();
            let serial = date_to_serial(date, BASE_DATE)?;
            history.row_serials.push(serial);

            let price = record.get(PRICE_COLUMN).unwrap_or_default();
            if price == MISSING_PRICE {
                continue;
            }
            let open_price = price
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ForecastError::InvalidNumericFormat {
                    line,
                    value: price.to_string(),
                })?;
            history
                .observations
                .push(Observation::new(serial, open_price));
        }

        Ok(history)
    }
}

/// Load only the priced observations from a CSV file
pub fn load_observations<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>> {
    HistoryLoader::from_csv(path).map(History::into_observations)
}

fn unreadable(path: &Path, err: csv::Error) -> ForecastError {
    let source = match err.into_kind() {
        csv::ErrorKind::Io(source) => source,
        other => io::Error::new(io::ErrorKind::InvalidData, format!("{:?}", other)),
    };
    ForecastError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    }
}
