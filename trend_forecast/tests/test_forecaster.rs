use approx::assert_relative_eq;
use chrono::NaiveDate;
use trend_forecast::config::ForecastConfig;
use trend_forecast::dates::serial_to_date_label;
use trend_forecast::{fit_line, forecast, ForecastError, LinearModel, Observation};

fn model(pairs: &[(i64, f64)]) -> LinearModel {
    let obs: Vec<Observation> = pairs
        .iter()
        .map(|&(x, y)| Observation::new(x, y))
        .collect();
    fit_line(&obs).unwrap()
}

fn may_2024_labels() -> Vec<String> {
    (1..=30).map(|day| format!("05/{:02}/2024", day)).collect()
}

#[test]
fn test_default_horizon_labels() {
    let config = ForecastConfig::default();

    for m in [
        model(&[(0, 100.0), (1, 102.0), (2, 104.0)]),
        model(&[(45_000, 7_000.0), (45_300, 6_200.0)]),
        model(&[(-5, 0.0), (5, 0.0)]),
    ] {
        let points = forecast(&m, &config).unwrap();
        let labels: Vec<String> = points.iter().map(|p| p.date_label.clone()).collect();
        assert_eq!(labels, may_2024_labels());
    }
}

#[test]
fn test_predictions_follow_the_line() {
    let m = model(&[(0, 100.0), (1, 102.0), (2, 104.0)]);
    let points = forecast(&m, &ForecastConfig::default()).unwrap();

    assert_eq!(points.len(), 30);
    for (i, point) in points.iter().enumerate() {
        let serial = 45_413 + i as i64;
        assert_eq!(point.serial_date, serial);
        assert_relative_eq!(
            point.predicted_price,
            2.0 * serial as f64 + 100.0,
            epsilon = 1e-6
        );
    }
}

#[test]
fn test_labels_are_independent_of_serials() {
    let config = ForecastConfig {
        start_serial: 0,
        ..ForecastConfig::default()
    };
    let m = model(&[(0, 1.0), (1, 2.0)]);
    let points = forecast(&m, &config).unwrap();

    assert_eq!(points[0].date_label, "05/01/2024");
    assert_ne!(
        serial_to_date_label(points[0].serial_date as f64).unwrap(),
        points[0].date_label
    );
}

#[test]
fn test_labels_roll_over_month_end() {
    let config = ForecastConfig {
        horizon: 32,
        label_start: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        ..ForecastConfig::default()
    };
    let m = model(&[(0, 1.0), (1, 2.0)]);
    let points = forecast(&m, &config).unwrap();

    assert_eq!(points[30].date_label, "05/31/2024");
    assert_eq!(points[31].date_label, "06/01/2024");
}

#[test]
fn test_zero_horizon_is_rejected() {
    let config = ForecastConfig {
        horizon: 0,
        ..ForecastConfig::default()
    };
    let m = model(&[(0, 1.0), (1, 2.0)]);
    assert!(matches!(
        forecast(&m, &config),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_actual_prices_align_to_horizon() {
    let config = ForecastConfig::default();
    let actual = config.actual_for_horizon().unwrap();
    assert_eq!(actual.len(), 30);
    assert_eq!(actual[0], 6654.97);
    assert_eq!(actual[29], 6506.40);

    let short = ForecastConfig {
        actual_open: vec![1.0; 10],
        ..ForecastConfig::default()
    };
    assert!(matches!(
        short.actual_for_horizon(),
        Err(ForecastError::LengthMismatch { actual: 10, .. })
    ));
}
