use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use landcal::api::generate_land_report;
use landcal::config::{FileConfig, PlotConfig, ReportConfig};
use landcal::domain::{MIN_POLYGON_POINTS, Parcel, Point, parse_pair};
use landcal::export::{
    default_area_filename, default_coordinates_filename, describe_area, format_number,
    read_coordinates_csv, write_area_csv, write_coordinates_csv,
};
use landcal::geometry::Winding;
use landcal::plot::{MIN_PLOT_POINTS, PlotOptions, write_svg};
use landcal::repl::{self, Session};

/// Compute the area of a land parcel from UTM survey coordinates
///
/// Examples:
///   # Area of a 40m x 40m plot (1 Rai)
///   landcal -p 670000,1500000 -p 670040,1500000 -p 670040,1500040 -p 670000,1500040
///
///   # Load points from CSV, export both CSV documents and a plot
///   landcal -i parcel.csv --export-coordinates --export-area --svg parcel.svg
///
///   # Edit points interactively, then ask for a narrative report
///   landcal --interactive --report
#[derive(Parser, Debug)]
#[command(name = "landcal")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches landcal.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Boundary point as "EASTING,NORTHING" in meters (repeat in traversal order)
    #[arg(short = 'p', long = "point", allow_hyphen_values = true)]
    points: Vec<String>,

    /// CSV file with boundary points ("index,x,y" or "x,y" rows)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Edit the point list interactively before computing
    #[arg(long)]
    interactive: bool,

    /// Print the area result as JSON
    #[arg(long)]
    json: bool,

    /// Export the point list as CSV (defaults to land_coordinates_<date>.csv)
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    export_coordinates: Option<Option<PathBuf>>,

    /// Export the area result as CSV (defaults to land_area_result_<date>.csv)
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    export_area: Option<Option<PathBuf>>,

    /// Write an SVG sketch of the parcel
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Generate a narrative report through the text-generation service
    #[arg(long)]
    report: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("landcal", LevelFilter::Debug)
        .format_timestamp(None)
        .init();
    log::set_max_level(LevelFilter::Warn);

    let file_config: Option<FileConfig> = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);
    if verbose {
        log::set_max_level(LevelFilter::Debug);
    }
    let json = args.json || file_config.as_ref().map(|c| c.json).unwrap_or(false);
    let input = args
        .input
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.input.clone()));
    let output_dir = file_config.as_ref().and_then(|c| c.output_dir.clone());
    let plot_config = file_config
        .as_ref()
        .and_then(|c| c.plot.clone())
        .unwrap_or_default();
    let report_config = file_config
        .as_ref()
        .and_then(|c| c.report.clone())
        .unwrap_or_default();

    let mut points = Vec::with_capacity(args.points.len());
    for raw in &args.points {
        points.push(parse_pair(raw).with_context(|| format!("Invalid --point {:?}", raw))?);
    }
    if points.is_empty()
        && let Some(ref path) = input
    {
        points = read_coordinates_csv(path)?;
        log::debug!("Loaded {} points from {}", points.len(), path.display());
    }

    let parcel = if args.interactive {
        let mut session = Session::new(Parcel::from_points(points));
        let stdin = std::io::stdin();
        let output = session_output(json, std::io::stdout(), std::io::stderr());
        repl::run(&mut session, stdin.lock(), output).context("Interactive session failed")?;
        session.parcel
    } else {
        if points.is_empty() {
            bail!("No coordinates given: use --point, --input or --interactive");
        }
        Parcel::from_points(points)
    };

    let points = parcel.points();
    let area = parcel.area();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&area).context("Failed to serialize area result")?
        );
    } else {
        println!("landcal - Land Area Calculator");
        println!("==============================");
        println!();
        if verbose {
            print_points(&points);
        }
        println!("Points: {}", points.len());
        if let Some(winding) = Winding::of(&points) {
            log::debug!("Boundary is traversed {}", winding);
        }
        println!("{}", describe_area(&area));
        println!();
    }

    if !parcel.has_enough_points() {
        log::warn!(
            "At least {} points are needed to compute an area ({} given)",
            MIN_POLYGON_POINTS,
            points.len()
        );
    }

    let today = chrono::Local::now();

    if let Some(ref target) = args.export_coordinates {
        if points.is_empty() {
            log::warn!("Skipping coordinate export: no points");
        } else {
            let path = resolve_output(
                target.as_deref(),
                output_dir.as_deref(),
                default_coordinates_filename(today.date_naive()),
            );
            write_coordinates_csv(&path, &points).context("Failed to export coordinates")?;
            status(json, &format!("Wrote coordinates: {}", path.display()));
        }
    }

    if let Some(ref target) = args.export_area {
        if area.is_empty() {
            log::warn!("Skipping area export: area is zero");
        } else {
            let path = resolve_output(
                target.as_deref(),
                output_dir.as_deref(),
                default_area_filename(today.date_naive()),
            );
            write_area_csv(&path, &area, &today).context("Failed to export area result")?;
            status(json, &format!("Wrote area result: {}", path.display()));
        }
    }

    if let Some(ref path) = args.svg {
        if points.len() < MIN_PLOT_POINTS {
            log::warn!(
                "Skipping plot: at least {} points are needed to draw the parcel",
                MIN_PLOT_POINTS
            );
        } else {
            write_svg(path, &points, &plot_options(&plot_config))
                .context("Failed to write parcel plot")?;
            status(json, &format!("Wrote plot: {}", path.display()));
        }
    }

    if args.report {
        print_report(&area, &report_config, json);
    }

    log::debug!(
        "Done in {:.2}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn print_points(points: &[Point]) {
    println!("{:<6} {:>16} {:>16}", "Point", "Easting (X)", "Northing (Y)");
    for (i, p) in points.iter().enumerate() {
        println!("{:<6} {:>16} {:>16}", format!("P{}", i + 1), p.x, p.y);
    }
    println!();
}

/// Report generation is best-effort: failures are shown and the run continues
fn print_report(area: &landcal::ThaiArea, config: &ReportConfig, json: bool) {
    if area.is_empty() {
        log::warn!("Skipping report: area is zero");
        return;
    }

    let spinner = create_spinner("Generating land report...");
    let start = Instant::now();

    match generate_land_report(area, config) {
        Ok(text) => {
            spinner.finish_with_message(format!(
                "Report generated [{:.1}s]",
                start.elapsed().as_secs_f32()
            ));
            if json {
                eprintln!("{}", text);
            } else {
                println!();
                println!("{}", text);
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            log::debug!("Report failed: {:#}", e);
            eprintln!(
                "{} (area {} m² is unaffected)",
                e,
                format_number(area.total_sq_meters)
            );
        }
    }
}

fn plot_options(config: &PlotConfig) -> PlotOptions {
    PlotOptions {
        width: config.width,
        height: config.height,
        ..PlotOptions::default()
    }
}

/// Explicit path wins; otherwise the default name, inside `output_dir` if configured
fn resolve_output(explicit: Option<&Path>, output_dir: Option<&Path>, default: PathBuf) -> PathBuf {
    match (explicit, output_dir) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(dir)) => dir.join(default),
        (None, None) => default,
    }
}

/// Status lines go to stderr when stdout carries JSON
fn status(json: bool, message: &str) {
    if json {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}

/// The interactive session shares stdout with the result, so it moves to
/// stderr when stdout carries JSON
fn session_output<'a>(
    json: bool,
    stdout: impl Write + 'a,
    stderr: impl Write + 'a,
) -> Box<dyn Write + 'a> {
    if json { Box::new(stderr) } else { Box::new(stdout) }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
