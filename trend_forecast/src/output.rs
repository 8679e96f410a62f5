//! Writing the predicted vs. actual comparison CSV

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

/// One line of the comparison file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "Date")]
    pub date_label: String,
    #[serde(rename = "PredictedOpen")]
    pub predicted_open: f64,
    #[serde(rename = "ActualOpen")]
    pub actual_open: f64,
}

/// Header line of the comparison file
pub const COMPARISON_HEADER: [&str; 3] = ["Date", "PredictedOpen", "ActualOpen"];

/// Zip the three series into rows, refusing series of different lengths
pub fn comparison_rows<S: AsRef<str>>(
    date_labels: &[S],
    predicted: &[f64],
    actual: &[f64],
) -> Result<Vec<ComparisonRow>> {
    if date_labels.len() != predicted.len() || predicted.len() != actual.len() {
        return Err(ForecastError::LengthMismatch {
            labels: date_labels.len(),
            predicted: predicted.len(),
            actual: actual.len(),
        });
    }

    Ok(date_labels
        .iter()
        .zip(predicted)
        .zip(actual)
        .map(|((label, &predicted_open), &actual_open)| ComparisonRow {
            date_label: label.as_ref().to_string(),
            predicted_open,
            actual_open,
        })
        .collect())
}

/// Write `Date,PredictedOpen,ActualOpen` followed by one row per day
///
/// Lengths are checked before the destination is created, so a mismatch
/// leaves no file behind.
pub fn write_comparison<S: AsRef<str>, P: AsRef<Path>>(
    date_labels: &[S],
    predicted: &[f64],
    actual: &[f64],
    destination: P,
) -> Result<()> {
    let destination = destination.as_ref();
    let rows = comparison_rows(date_labels, predicted, actual)?;

    let unwritable = |source: io::Error| ForecastError::FileUnwritable {
        path: destination.to_path_buf(),
        source,
    };

    let file = File::create(destination).map_err(unwritable)?;
    let mut writer = csv::Writer::from_writer(file);
    if rows.is_empty() {
        writer
            .write_record(COMPARISON_HEADER)
            .map_err(|err| unwritable(csv_to_io(err)))?;
    }
    for row in &rows {
        writer
            .serialize(row)
            .map_err(|err| unwritable(csv_to_io(err)))?;
    }
    writer.flush().map_err(unwritable)?;

    info!(
        path = %destination.display(),
        rows = rows.len(),
        "Data written successfully"
    );
    Ok(())
}

/// Read a comparison file written by [`write_comparison`]
pub fn read_comparison<P: AsRef<Path>>(path: P) -> Result<Vec<ComparisonRow>> {
    let path = path.as_ref();
    let unreadable = |source: io::Error| match source.kind() {
        io::ErrorKind::NotFound => ForecastError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ForecastError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        },
    };

    let file = File::open(path).map_err(unreadable)?;
    let mut reader = csv::Reader::from_reader(file);
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<ComparisonRow>, _>>()
        .map_err(|err| unreadable(csv_to_io(err)))
}

fn csv_to_io(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(source) => source,
        other => io::Error::new(io::ErrorKind::InvalidData, format!("{:?}", other)),
    }
}
