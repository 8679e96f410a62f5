//! Rendering the comparison CSV as a line chart

use crate::dates::parse_date_label;
use crate::error::{ForecastError, Result};
use crate::output::read_comparison;
use chrono::{DateTime, TimeZone, Utc};
use plotters::prelude::*;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

pub const CHART_TITLE: &str = "Predicted vs Actual Open Over Time";

/// Something that turns a comparison CSV into an image
pub trait ChartRenderer {
    /// Render the CSV at `data_csv` into `image`
    fn render(&self, data_csv: &Path, image: &Path) -> Result<()>;

    /// Name used in log lines
    fn name(&self) -> &str;
}

/// Renders through an external `gnuplot` process fed a script on stdin
#[derive(Debug, Clone)]
pub struct GnuplotRenderer {
    program: String,
}

impl Default for GnuplotRenderer {
    fn default() -> Self {
        Self::new("gnuplot")
    }
}

impl GnuplotRenderer {
    /// Use `program` as the gnuplot executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The gnuplot script that draws `data_csv` into `image`
    pub fn script(&self, data_csv: &Path, image: &Path) -> String {
        let data = quote(data_csv);
        let mut script = String::new();
        script.push_str("set terminal pngcairo enhanced font 'Verdana,12'\n");
        script.push_str(&format!("set output {}\n", quote(image)));
        script.push_str("set datafile separator ','\n");
        script.push_str("set xdata time\n");
        script.push_str("set timefmt \"%m/%d/%Y\"\n");
        script.push_str("set format x \"%m/%d\"\n");
        script.push_str(&format!("set title \"{}\"\n", CHART_TITLE));
        script.push_str("set xlabel \"Date\"\n");
        script.push_str("set ylabel \"Open Price\"\n");
        script.push_str(&format!(
            "plot {data} skip 1 using 1:2 with lines title 'Predicted Open' lc rgb 'blue', \\\n     {data} skip 1 using 1:3 with lines title 'Actual Open' lc rgb 'red'\n"
        ));
        script
    }
}

// gnuplot single-quoted string; a quote inside is written twice
fn quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', "''"))
}

impl ChartRenderer for GnuplotRenderer {
    fn render(&self, data_csv: &Path, image: &Path) -> Result<()> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ForecastError::ExternalToolUnavailable {
                tool: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(self.script(data_csv, image).as_bytes())
                .map_err(|e| {
                    ForecastError::ChartRenderFailed(format!("writing gnuplot script: {}", e))
                })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            ForecastError::ChartRenderFailed(format!("waiting for {}: {}", self.program, e))
        })?;
        if !output.status.success() {
            return Err(ForecastError::ChartRenderFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        info!(image = %image.display(), "Plot generated");
        Ok(())
    }

    fn name(&self) -> &str {
        "gnuplot"
    }
}

/// Renders in-process with plotters' bitmap backend
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    width: u32,
    height: u32,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

fn render_error<E: std::fmt::Display>(err: E) -> ForecastError {
    ForecastError::ChartRenderFailed(err.to_string())
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, data_csv: &Path, image: &Path) -> Result<()> {
        let rows = read_comparison(data_csv)?;
        if rows.len() < 2 {
            return Err(ForecastError::ChartRenderFailed(
                "Not enough rows to draw a line (minimum 2 required)".to_string(),
            ));
        }

        let mut points: Vec<(DateTime<Utc>, f64, f64)> = Vec::with_capacity(rows.len());
        for row in &rows {
            let date = parse_date_label(&row.date_label)?;
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| ForecastError::InvalidDateFormat {
                    value: row.date_label.clone(),
                })?;
            points.push((
                Utc.from_utc_datetime(&midnight),
                row.predicted_open,
                row.actual_open,
            ));
        }
        points.sort_by_key(|p| p.0);

        let (min_price, max_price) = points
            .iter()
            .flat_map(|&(_, p, a)| [p, a])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let padding = (max_price - min_price).max(1e-8) * 0.1;
        let x_min = points[0].0;
        let x_max = points[points.len() - 1].0;

        let root = BitMapBackend::new(image, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 30.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, (min_price - padding)..(max_price + padding))
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Open Price")
            .x_label_formatter(&|d: &DateTime<Utc>| d.format("%m/%d").to_string())
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|&(d, predicted, _)| (d, predicted)),
                &BLUE,
            ))
            .map_err(render_error)?
            .label("Predicted Open")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|&(d, _, actual)| (d, actual)),
                &RED,
            ))
            .map_err(render_error)?
            .label("Actual Open")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)?;

        info!(image = %image.display(), "Plot generated");
        Ok(())
    }

    fn name(&self) -> &str {
        "plotters"
    }
}
