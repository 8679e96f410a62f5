use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;
use trend_forecast::data::{load_observations, HistoryLoader};
use trend_forecast::{ForecastError, Observation};

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_load_observations_from_csv() {
    let file = csv_file(&[
        "Date,Open,High,Low,Close,Adj Close,Volume",
        "2024-01-02,6450.0,6500.0,6400.0,6470.5,6470.5,1000",
        "2024-01-03,6470.0,6520.0,6460.0,6490.25,6490.25,1200",
    ]);

    let observations = load_observations(file.path()).unwrap();

    assert_eq!(
        observations,
        vec![
            Observation::new(45_291, 6470.5),
            Observation::new(45_292, 6490.25),
        ]
    );
}

#[test]
fn test_null_price_rows_are_skipped() {
    let file = csv_file(&["Date,a,b,c,Price", "2024-01-01,,,,null", "2024-01-02,,,,50.5"]);

    let history = HistoryLoader::from_csv(file.path()).unwrap();

    assert_eq!(history.observations(), &[Observation::new(45_291, 50.5)]);
    // The skipped row still has its date recorded
    assert_eq!(history.row_serials(), &[45_290, 45_291]);
    assert_eq!(history.missing_count(), 1);
    assert_eq!(history.len(), 1);
}

#[test]
fn test_header_is_always_skipped() {
    // Even a header that looks like data is dropped
    let file = csv_file(&["2023-12-29,,,,1.0", "2024-01-02,,,,2.0"]);

    let observations = load_observations(file.path()).unwrap();
    assert_eq!(observations, vec![Observation::new(45_291, 2.0)]);
}

#[test]
fn test_leading_blank_line_is_not_the_header() {
    // Blank lines are ignored, so the real header is still the one skipped
    let file = csv_file(&["", "Date,a,b,c,Price", "2024-01-01,,,,1.0"]);

    let observations = load_observations(file.path()).unwrap();
    assert_eq!(observations, vec![Observation::new(45_290, 1.0)]);
}

#[test]
fn test_input_order_is_preserved() {
    let file = csv_file(&[
        "Date,a,b,c,Price",
        "2024-01-03,,,,3.0",
        "2024-01-01,,,,1.0",
        "2024-01-02,,,,2.0",
    ]);

    let serials: Vec<i64> = load_observations(file.path())
        .unwrap()
        .iter()
        .map(|o| o.serial_date)
        .collect();
    assert_eq!(serials, vec![45_292, 45_290, 45_291]);
}

#[test]
fn test_header_only_file_is_empty() {
    let file = csv_file(&["Date,Open,High,Low,Close"]);

    let history = HistoryLoader::from_csv(file.path()).unwrap();
    assert!(history.is_empty());
    assert!(history.row_serials().is_empty());
}

#[test]
fn test_missing_file() {
    let err = HistoryLoader::from_csv("nonexistent_file.csv").unwrap_err();
    assert!(matches!(err, ForecastError::FileNotFound { .. }));
}

#[test]
fn test_directory_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let err = HistoryLoader::from_csv(dir.path()).unwrap_err();
    assert!(matches!(err, ForecastError::FileUnreadable { .. }));
}

#[test]
fn test_non_numeric_price() {
    let file = csv_file(&["Date,a,b,c,Price", "2024-01-01,,,,1.0", "2024-01-02,,,,abc"]);

    match HistoryLoader::from_csv(file.path()).unwrap_err() {
        ForecastError::InvalidNumericFormat { line, value } => {
            assert_eq!(line, 3);
            assert_eq!(value, "abc");
        }
        other => panic!("Expected InvalidNumericFormat, got {:?}", other),
    }
}

#[test]
fn test_empty_or_short_price_field() {
    let empty = csv_file(&["Date,a,b,c,Price", "2024-01-01,,,,"]);
    assert!(matches!(
        HistoryLoader::from_csv(empty.path()).unwrap_err(),
        ForecastError::InvalidNumericFormat { .. }
    ));

    let short = csv_file(&["Date,a,b,c,Price", "2024-01-01,1.0"]);
    assert!(matches!(
        HistoryLoader::from_csv(short.path()).unwrap_err(),
        ForecastError::InvalidNumericFormat { .. }
    ));
}

#[test]
fn test_bad_date() {
    let file = csv_file(&["Date,a,b,c,Price", "01/02/2024,,,,1.0"]);
    assert!(matches!(
        HistoryLoader::from_csv(file.path()).unwrap_err(),
        ForecastError::InvalidDateFormat { .. }
    ));
}
