//! # PaintPilot CLI
//!
//! Runs a takeoff from a floor-plan PDF and writes the bid package.
//!
//! ```text
//! paintpilot takeoff --input plans.pdf [--output output/bid_package.xlsx]
//! paintpilot sample-pdf
//! ```
//!
//! Plan extraction is a demo: unless `--rooms` points at a JSON room list,
//! the fixed second-floor office plan is used whatever the input file is.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use takeoff_core::calculator::{process_takeoff, TakeoffResult};
use takeoff_core::config::{load_config, TakeoffConfig, CONFIG_ENV_VAR};
use takeoff_core::export::{generate_workbook, summary_sheet, Cell};
use takeoff_core::extraction::{extract_metadata, mock_room_extraction, write_sample_pdf, SAMPLE_PDF_PATH};
use takeoff_core::file_io::{load_rooms, save_report, write_atomic};
use takeoff_core::finish_systems::Materials;
use takeoff_core::floor_plan::{render_floor_plan_svg, SvgSizing};
use takeoff_core::pdf::render_bid_pdf;
use takeoff_core::preview::render_preview_html;
use takeoff_core::report::TakeoffReport;
use takeoff_core::rooms::RoomsData;
use takeoff_core::summary::TakeoffSummary;

/// Hours a manual takeoff of the demo plan takes
const DEMO_HOURS_SAVED: f64 = 3.5;
/// Estimator rate used for the ROI callout ($/hr)
const DEMO_HOURLY_RATE: f64 = 55.0;

#[derive(Parser)]
#[command(name = "paintpilot", version, about = "Paint and wallcovering takeoff from floor plans")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a takeoff and write the bid package
    Takeoff(TakeoffArgs),
    /// Write a placeholder plan PDF to use as demo input
    SamplePdf {
        /// Where to write the PDF
        #[arg(long, default_value = SAMPLE_PDF_PATH)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct TakeoffArgs {
    /// Floor-plan PDF
    #[arg(long)]
    input: PathBuf,

    /// Excel workbook path
    #[arg(long, default_value = "output/bid_package.xlsx")]
    output: PathBuf,

    /// JSON room list to use instead of the demo plan
    #[arg(long)]
    rooms: Option<PathBuf>,

    /// TOML file overriding opening sizes and coverage rates
    #[arg(long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Write the floor-plan diagram as SVG
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write an HTML preview page
    #[arg(long)]
    html: Option<PathBuf>,

    /// Keep the preview diagram at full size instead of fitting the window
    #[arg(long)]
    no_fit: bool,

    /// Write a PDF bid summary
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Write the JSON takeoff report
    #[arg(long)]
    json: Option<PathBuf>,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_takeoff_config(path: Option<&Path>) -> Result<TakeoffConfig> {
    match path {
        Some(path) => {
            load_config(path).with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(TakeoffConfig::default()),
    }
}

fn load_room_data(args: &TakeoffArgs) -> Result<RoomsData> {
    match &args.rooms {
        Some(path) => load_rooms(path).with_context(|| format!("Failed to load rooms from {}", path.display())),
        None => Ok(mock_room_extraction(&args.input)),
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn print_room_table(results: &[TakeoffResult]) {
    println!(
        "{:<8} {:<20} {:<13} {:>10} {:>10} {:>8} {:>8} {:>8} {:>6}",
        "Room", "Name", "Finish", "Gross sf", "Net sf", "Primer", "Finish", "Total", "Rolls"
    );
    for r in results {
        let (primer, finish, total, rolls) = match &r.materials {
            Materials::Paint(p) => (
                Some(p.primer_gallons.value()),
                Some(p.finish_gallons.value()),
                Some(p.total_gallons.value()),
                None,
            ),
            Materials::Wallcovering(w) => (None, None, None, Some(w.rolls.value())),
        };
        println!(
            "{:<8} {:<20} {:<13} {:>10} {:>10} {:>8} {:>8} {:>8} {:>6}",
            r.room.id,
            r.room.name,
            r.materials.finish_type().as_str(),
            r.gross_area.value(),
            r.net_area.value(),
            fmt_opt(primer),
            fmt_opt(finish),
            fmt_opt(total),
            fmt_opt(rolls),
        );
    }
}

fn print_summary(summary: &TakeoffSummary) {
    println!("Summary");
    for row in summary_sheet(summary).rows {
        if let [Cell::Text(metric), Cell::Number(value)] = row.as_slice() {
            println!("  {:<26} {}", metric, value);
        }
    }
}

fn run_takeoff(args: &TakeoffArgs) -> Result<()> {
    println!("PaintPilot - Processing...");
    let config = load_takeoff_config(args.config.as_deref())?;

    println!("Analyzing floor plans...");
    let meta = extract_metadata(&args.input);
    tracing::info!(file = %meta.file, pages = meta.pages, size_bytes = ?meta.size_bytes, "Plan metadata");
    let rooms_data = load_room_data(args)?;

    println!("Calculating quantities...");
    let results = process_takeoff(&rooms_data, &config);
    let summary = TakeoffSummary::from_results(&results);
    println!();
    print_room_table(&results);
    println!();
    print_summary(&summary);
    println!();

    println!("Generating bid package...");
    let output_path = generate_workbook(&results, &args.output)
        .with_context(|| format!("Failed to write workbook {}", args.output.display()))?;

    if let Some(path) = &args.svg {
        match render_floor_plan_svg(&rooms_data, &config.openings, SvgSizing::Fixed) {
            Some(svg) => {
                write_atomic(path, svg.as_bytes())
                    .with_context(|| format!("Failed to write SVG {}", path.display()))?;
                println!("Floor plan: {}", path.display());
            }
            None => tracing::warn!("No rooms available for visualization; skipping SVG"),
        }
    }

    if let Some(path) = &args.html {
        let html = render_preview_html(&rooms_data, &results, &config, !args.no_fit);
        write_atomic(path, html.as_bytes())
            .with_context(|| format!("Failed to write HTML preview {}", path.display()))?;
        println!("Preview: {}", path.display());
    }

    if let Some(path) = &args.pdf {
        let bytes = render_bid_pdf(&rooms_data, &results, &config).context("Failed to render PDF")?;
        write_atomic(path, &bytes).with_context(|| format!("Failed to write PDF {}", path.display()))?;
        println!("Bid summary: {}", path.display());
    }

    if let Some(path) = &args.json {
        let report = TakeoffReport::new(&rooms_data, results);
        save_report(&report, path).with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("Report: {}", path.display());
    }

    println!("Complete! Saved to: {}", output_path.display());
    println!(
        "Project: {} | Floor: {}",
        rooms_data.project.as_deref().unwrap_or("None"),
        rooms_data.floor.as_deref().unwrap_or("None")
    );
    println!("Time saved (demo): ~{} hours", DEMO_HOURS_SAVED);
    println!(
        "ROI (demo): ~${:.2} (@ ${}/hr)",
        DEMO_HOURS_SAVED * DEMO_HOURLY_RATE,
        DEMO_HOURLY_RATE
    );
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Takeoff(args) => run_takeoff(&args),
        Command::SamplePdf { output } => {
            write_sample_pdf(&output).with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote sample PDF: {}", output.display());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
