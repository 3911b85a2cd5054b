use anyhow::Context;
use clap::Parser;
use fxlens::application::pipeline::{AnalysisPipeline, AnalysisReport};
use fxlens::application::reporting::{ConsoleReporter, CsvExporter};
use fxlens::config::AnalysisConfig;
use fxlens::domain::ports::MarketDataProvider;
use fxlens::infrastructure::YahooFinanceProvider;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info, warn};

#[derive(Parser)]
#[command(author, version, about = "Currency pair analysis: returns, statistics, MA crossover signals", long_about = None)]
struct Cli {
    /// Skip the interactive chart window
    #[arg(long)]
    no_charts: bool,

    /// Directory for the exported CSV files (overrides FX_OUTPUT_DIR)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AnalysisConfig::from_env()?;
    if cli.no_charts {
        config.show_charts = false;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    info!("Starting Currency Analysis...");

    let provider = Arc::new(YahooFinanceProvider::new(&config.provider));
    info!("Market data from {} ({})", provider.name(), provider.base_url());
    let show_charts = config.show_charts;
    let output_dir = config.output_dir.clone();
    let pipeline = AnalysisPipeline::new(config, provider);

    // Fetching is the only async stage; charts need the main thread afterwards.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;
    let report = runtime.block_on(pipeline.analyze())?;
    drop(runtime);

    let reporter = ConsoleReporter::new();
    reporter.print_report(&report);

    if show_charts {
        info!("Creating visualizations...");
        display_charts(&report);
    } else {
        info!("Chart display disabled");
    }

    reporter.print_insights();

    let exporter = CsvExporter::new(output_dir);
    info!("Saving results to CSV files in {}...", exporter.output_dir().display());
    let summary = exporter.export_all(&report);
    reporter.print_export_summary(&summary);

    Ok(())
}

#[cfg(feature = "ui")]
fn display_charts(report: &AnalysisReport) {
    if let Err(e) = fxlens::interfaces::show_charts(report) {
        warn!("Could not display charts: {:#}", e);
    }
}

#[cfg(not(feature = "ui"))]
fn display_charts(_report: &AnalysisReport) {
    warn!("Built without the `ui` feature; skipping charts");
}
