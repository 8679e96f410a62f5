//! Conversions between calendar dates and serial day numbers
//!
//! Two conventions meet here. Historical rows are measured as a plain day
//! difference from [`BASE_DATE`], while forecast serials follow the
//! spreadsheet convention anchored [`SPREADSHEET_EPOCH_OFFSET`] days before
//! the Unix epoch. The two disagree by [`SPREADSHEET_EPOCH_CORRECTION`] days
//! and are deliberately left unreconciled in the data path.

use crate::config::{BASE_DATE, SPREADSHEET_EPOCH_CORRECTION, SPREADSHEET_EPOCH_OFFSET};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate};

/// Format used by the input file
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for every date label written out
pub const LABEL_FORMAT: &str = "%m/%d/%Y";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|_| {
        ForecastError::InvalidDateFormat {
            value: value.to_string(),
        }
    })
}

/// Whole days from `epoch` to `date`, both in `YYYY-MM-DD` form
///
/// # Examples
///
/// ```
/// use trend_forecast::dates::date_to_serial;
///
/// assert_eq!(date_to_serial("1970-01-01", "1900-01-01").unwrap(), 25_567);
/// assert_eq!(date_to_serial("1899-12-31", "1900-01-01").unwrap(), -1);
/// ```
pub fn date_to_serial(date: &str, epoch: &str) -> Result<i64> {
    let date = parse_iso_date(date)?;
    let epoch = parse_iso_date(epoch)?;
    Ok(date.signed_duration_since(epoch).num_days())
}

/// Spreadsheet serial for a `YYYY-MM-DD` date
pub fn to_spreadsheet_serial(date: &str) -> Result<i64> {
    Ok(date_to_serial(date, BASE_DATE)? + SPREADSHEET_EPOCH_CORRECTION)
}

/// `MM/DD/YYYY` label for a spreadsheet serial, read as a UTC day
///
/// Fractional serials are truncated to whole seconds before conversion.
///
/// # Examples
///
/// ```
/// use trend_forecast::dates::serial_to_date_label;
///
/// assert_eq!(serial_to_date_label(45_413.0).unwrap(), "05/01/2024");
/// assert_eq!(serial_to_date_label(25_569.0).unwrap(), "01/01/1970");
/// ```
pub fn serial_to_date_label(serial: f64) -> Result<String> {
    let out_of_range = || ForecastError::InvalidDateFormat {
        value: serial.to_string(),
    };

    let seconds = (serial - SPREADSHEET_EPOCH_OFFSET as f64) * SECONDS_PER_DAY;
    if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return Err(out_of_range());
    }

    let timestamp = DateTime::from_timestamp(seconds as i64, 0).ok_or_else(out_of_range)?;
    Ok(format_date_label(timestamp.date_naive()))
}

/// `MM/DD/YYYY` label for a calendar date
pub fn format_date_label(date: NaiveDate) -> String {
    date.format(LABEL_FORMAT).to_string()
}

/// Parse a `MM/DD/YYYY` label back into a date
pub fn parse_date_label(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), LABEL_FORMAT).map_err(|_| {
        ForecastError::InvalidDateFormat {
            value: value.to_string(),
        }
    })
}
