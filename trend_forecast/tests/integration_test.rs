use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use trend_forecast::config::PipelineConfig;
use trend_forecast::output::read_comparison;
use trend_forecast::{run_pipeline, ChartRenderer, ForecastError, GnuplotRenderer};

#[derive(Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, data_csv: &Path, image: &Path) -> trend_forecast::error::Result<()> {
        // The CSV must already be complete when the renderer runs
        assert_eq!(read_comparison(data_csv)?.len(), 30);
        self.calls
            .borrow_mut()
            .push((data_csv.to_path_buf(), image.to_path_buf()));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn setup(history: &str) -> (TempDir, PipelineConfig) {
    let dir = tempdir().unwrap();
    let input = dir.path().join("PSEI.csv");
    fs::write(&input, history).unwrap();

    let config = PipelineConfig {
        input_path: input,
        output_path: dir.path().join("open_data.csv"),
        image_path: dir.path().join("predicted_vs_actual_open.png"),
        ..PipelineConfig::default()
    };
    (dir, config)
}

// Yahoo-style rows; the fifth column rises by 2 per day
fn rising_history() -> String {
    let mut text = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    text.push_str("2024-04-01,6900.0,6950.0,6850.0,6600.0,6600.0,100\n");
    text.push_str("2024-04-02,6900.0,6950.0,6850.0,null,null,null\n");
    text.push_str("2024-04-03,6900.0,6950.0,6850.0,6604.0,6604.0,100\n");
    text.push_str("2024-04-04,6900.0,6950.0,6850.0,6606.0,6606.0,100\n");
    text
}

#[test]
fn test_pipeline_end_to_end() {
    let (_dir, config) = setup(&rising_history());
    let renderer = RecordingRenderer::default();

    let report = run_pipeline(&config, Some(&renderer)).unwrap();

    assert_eq!(report.rows_read, 4);
    assert_eq!(report.rows_missing, 1);
    assert!((report.model.slope() - 2.0).abs() < 1e-6);
    assert_eq!(report.points.len(), 30);
    assert!(report.chart_rendered);

    let rows = read_comparison(&config.output_path).unwrap();
    assert_eq!(rows.len(), 30);
    assert_eq!(rows[0].date_label, "05/01/2024");
    assert_eq!(rows[29].date_label, "05/30/2024");
    assert_eq!(rows[0].actual_open, 6654.97);
    assert_eq!(rows[29].actual_open, 6506.40);
    for (row, point) in rows.iter().zip(&report.points) {
        assert_eq!(row.predicted_open, point.predicted_price);
    }

    let calls = renderer.calls.borrow();
    assert_eq!(
        calls.as_slice(),
        &[(config.output_path.clone(), config.image_path.clone())]
    );
}

#[test]
fn test_chart_failure_is_not_fatal() {
    let (_dir, config) = setup(&rising_history());
    let renderer = GnuplotRenderer::new("definitely-not-gnuplot-3f9a1c");

    let report = run_pipeline(&config, Some(&renderer)).unwrap();

    assert!(!report.chart_rendered);
    assert!(config.output_path.exists());
}

#[test]
fn test_pipeline_without_renderer() {
    let (_dir, config) = setup(&rising_history());

    let report = run_pipeline(&config, None).unwrap();
    assert!(!report.chart_rendered);
    assert!(!config.image_path.exists());
}

#[test]
fn test_single_observation_is_degenerate() {
    let (_dir, config) = setup("Date,a,b,c,Price\n2024-04-01,,,,6600.0\n2024-04-02,,,,null\n");

    let err = run_pipeline(&config, None).unwrap_err();
    assert!(err.is_degenerate_input());
    assert!(!config.output_path.exists());
}

#[test]
fn test_missing_input() {
    let (dir, mut config) = setup("");
    config.input_path = dir.path().join("missing.csv");

    let err = run_pipeline(&config, None).unwrap_err();
    assert!(matches!(err, ForecastError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}
