mod render;
mod tui;

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Month;
use clap::Parser;
use solarh2_core::{
    parse_month, DashboardConfig, DatasetRepository, DatasetService, FileDatasetRepository,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::render::{metrics, MonthView, RenderFormat};
use crate::tui::app::DashboardApp;

#[derive(Parser)]
#[command(name = "solarh2")]
#[command(about = "Monthly results of a solar + battery + hydrogen plant", long_about = None)]
struct Cli {
    /// Directory holding the monthly CSV files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Year used in titles and export file names
    #[arg(long, global = true)]
    year: Option<i32>,

    /// SOC (%) at or below which a day counts as "at minimum"
    #[arg(long, global = true)]
    min_soc: Option<f64>,

    /// Config file (defaults to ~/.solarh2/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List the month files found in the data directory
    Months,
    /// Print the headline metrics of a month
    Summary {
        #[arg(short, long, value_parser = parse_month)]
        month: Option<Month>,
    },
    /// Render a month as a table, CSV, HTML or JSON
    Show {
        #[arg(short, long, value_parser = parse_month)]
        month: Option<Month>,
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Table)]
        format: RenderFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a month's normalized data as CSV
    Export {
        #[arg(short, long, value_parser = parse_month)]
        month: Option<Month>,
        /// Defaults to <data-dir>/exports/solar_h2_<month>_<year>_detailed.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Allow replacing one of the source CSV files
        #[arg(long)]
        force: bool,
    },
    /// Open the interactive dashboard
    Dashboard {
        #[arg(short, long, value_parser = parse_month)]
        month: Option<Month>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("solarh2=info,solarh2_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(year) = cli.year {
        config.year = year;
    }
    if let Some(threshold) = cli.min_soc {
        config.min_soc_threshold = threshold;
    }
    Ok(config)
}

/// Explicit month, then the configured one, then the first file found.
fn pick_month<R: DatasetRepository>(
    service: &DatasetService<R>,
    requested: Option<Month>,
    config: &DashboardConfig,
) -> Result<Month> {
    if let Some(month) = requested.or(config.selected_month) {
        return Ok(month);
    }
    service
        .available_months()?
        .first()
        .map(|f| f.month)
        .ok_or_else(|| anyhow!("No CSV files found in {}", config.data_dir.display()))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let repo = FileDatasetRepository::new(config.data_dir.clone())?;
    let service = DatasetService::new(repo);

    match cli.command {
        Some(Commands::Months) => {
            let files = service.available_months()?;
            if files.is_empty() {
                println!("No CSV files found in {}", config.data_dir.display());
            } else {
                println!("{:<10} {}", "Month", "File");
                println!("{:-<10} {:-<40}", "", "");
                for file in files {
                    println!("{:<10} {}", file.month.name(), file.path.display());
                }
            }
        }
        Some(Commands::Summary { month }) => {
            let month = pick_month(&service, month, &config)?;
            let dataset = service.load_month(month)?;
            let summary = service.summarize(&dataset, config.min_soc_threshold);
            println!("{} {} ({} days)", month.name(), config.year, summary.days);
            for (label, value) in metrics(&summary) {
                println!("  {:<22} {}", label, value);
            }
        }
        Some(Commands::Show {
            month,
            format,
            output,
        }) => {
            let month = pick_month(&service, month, &config)?;
            let dataset = service.load_month(month)?;
            let summary = service.summarize(&dataset, config.min_soc_threshold);
            let view = MonthView {
                dataset: &dataset,
                summary: &summary,
                year: config.year,
            };

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Could not create {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    format.renderer(false).render(&view, &mut writer)?;
                    writer.flush()?;
                    info!(file = %path.display(), "report written");
                }
                None => {
                    let colored = io::stdout().is_terminal();
                    let mut stdout = io::stdout().lock();
                    format.renderer(colored).render(&view, &mut stdout)?;
                }
            }
        }
        Some(Commands::Export {
            month,
            output,
            force,
        }) => {
            let month = pick_month(&service, month, &config)?;
            let dataset = service.load_month(month)?;
            let path = output.unwrap_or_else(|| config.export_path(month));
            service.export_month(&dataset, &path, force)?;
            println!("Exported {} {} to {}", month.name(), config.year, path.display());
        }
        Some(Commands::Dashboard { month }) => run_dashboard(&service, month, &config)?,
        None => run_dashboard(&service, None, &config)?,
    }
    Ok(())
}

fn run_dashboard<R: DatasetRepository>(
    service: &DatasetService<R>,
    month: Option<Month>,
    config: &DashboardConfig,
) -> Result<()> {
    // Failed months are logged by the service and left out.
    let report = service.load_all()?;
    if report.datasets.is_empty() {
        println!("No valid data loaded. Please check the CSV files in {}", config.data_dir.display());
        return Ok(());
    }

    let app = DashboardApp::new(
        report.datasets,
        config.year,
        config.min_soc_threshold,
        month.or(config.selected_month),
    );
    tui::run(app)
}
