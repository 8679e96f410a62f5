use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trend_forecast::config::{
    PipelineConfig, DEFAULT_IMAGE_PATH, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH,
};
use trend_forecast::{run_pipeline, ChartRenderer, GnuplotRenderer, PlottersRenderer};

#[derive(Parser)]
#[command(name = "psei_forecast")]
#[command(version)]
#[command(about = "Fit a linear trend to PSEI opening prices and forecast 30 days ahead", long_about = None)]
struct Cli {
    /// Historical price CSV
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Comparison CSV to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Chart image to render
    #[arg(long, default_value = DEFAULT_IMAGE_PATH)]
    image: PathBuf,

    /// How to draw the chart
    #[arg(long, value_enum, default_value_t = Renderer::Gnuplot)]
    renderer: Renderer,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Renderer {
    /// Pipe a script to an external gnuplot
    Gnuplot,
    /// Draw in-process with plotters
    Plotters,
    /// Skip the chart
    None,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig {
        input_path: cli.input,
        output_path: cli.output,
        image_path: cli.image,
        ..PipelineConfig::default()
    };

    let renderer: Option<Box<dyn ChartRenderer>> = match cli.renderer {
        Renderer::Gnuplot => Some(Box::new(GnuplotRenderer::default())),
        Renderer::Plotters => Some(Box::new(PlottersRenderer::default())),
        Renderer::None => None,
    };

    match run_pipeline(&config, renderer.as_deref()) {
        Ok(report) => {
            info!(
                rows = report.rows_read,
                skipped = report.rows_missing,
                chart = report.chart_rendered,
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
