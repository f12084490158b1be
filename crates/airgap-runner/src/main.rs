//! The `airgap` binary: build a session from fetched payload files and
//! print a clearance report.

use airgap_clearance::AirGapSession;
use airgap_level::LevelPayload;
use airgap_runner::{input, report, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "airgap",
    about = "Compute bridge air gap clearance profiles from fetched payloads"
)]
struct Args {
    /// YAML session configuration.
    #[arg(long)]
    config: PathBuf,

    /// Contour GeoJSON payload file.
    #[arg(long)]
    contour: PathBuf,

    /// Bathymetry depths JSON payload file.
    #[arg(long)]
    depths: Option<PathBuf>,

    /// Tide station JSON payload file.
    #[arg(long)]
    tide: Option<PathBuf>,

    /// Hydrograph XML payload files as ID=PATH pairs, repeatable.
    #[arg(long = "gage", value_name = "ID=PATH")]
    gages: Vec<String>,

    /// Rendered waterway width in pixels.
    #[arg(long, default_value_t = 1000)]
    width: usize,

    /// Vessel height in meters; enables impassability classification.
    #[arg(long)]
    vessel_height: Option<f64>,

    /// Flip the view from the configured initial orientation.
    #[arg(long)]
    flip: bool,

    /// Number of clearance profile rows to print.
    #[arg(long, default_value_t = 11)]
    rows: usize,
}

fn run(args: &Args) -> Result<()> {
    let config = input::load_config(&args.config)?;
    let contour = input::load_contour(&args.contour)?;
    let depths = match &args.depths {
        Some(path) => input::load_depths(path)?,
        None => Vec::new(),
    };

    let tide = match &args.tide {
        Some(path) => Some(input::load_tide(path)?),
        None => None,
    };
    let gages = args
        .gages
        .iter()
        .map(|argument| input::load_gage(argument))
        .collect::<Result<Vec<_>>>()?;

    let payload = match &tide {
        Some(json) => LevelPayload::Tide(json),
        None if !gages.is_empty() => LevelPayload::Gages(&gages),
        None => LevelPayload::None,
    };

    let mut session = AirGapSession::new(config, &contour, depths, args.width, &payload)?;
    if args.flip {
        session.toggle_orientation();
    }

    print!(
        "{}",
        report::render_report(&session, args.vessel_height, Utc::now(), args.rows)
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
