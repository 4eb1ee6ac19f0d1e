//! wing - horseshoe vortex-lattice lift & induced drag
//!
//! CLI Usage:
//!   wing                              # ./wing.json, else the reference case (45° sweep, α = 5°)
//!   wing --config wing.json           # load a run configuration
//!   wing --alpha 8 --stations 21      # override single fields
//!   wing --polar 0,2,4,6,8,10         # CL/CDi sweep over α
//!   wing --export out/wing.json       # geometry & results for plotting

mod config;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use config::RunConfig;

/// Picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "wing.json";

/// Lift and induced drag of a swept, tapered wing by the horseshoe vortex-lattice method
#[derive(Parser, Debug)]
#[command(name = "wing", version, about)]
struct Cli {
    /// JSON run configuration (defaults used for missing fields) [default: ./wing.json if present]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Free-stream speed (m/s)
    #[arg(long)]
    speed: Option<f64>,

    /// Angle of attack (deg)
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<f64>,

    /// Leading-edge sweep (deg)
    #[arg(long, allow_negative_numbers = true)]
    sweep: Option<f64>,

    /// Taper ratio (tip chord / root chord)
    #[arg(long)]
    taper: Option<f64>,

    /// Dihedral (deg)
    #[arg(long, allow_negative_numbers = true)]
    dihedral: Option<f64>,

    /// Tip twist, positive washout (trailing edge up) (deg)
    #[arg(long, allow_negative_numbers = true)]
    twist: Option<f64>,

    /// Spanwise stations on the half-wing
    #[arg(long)]
    stations: Option<usize>,

    /// Angles of attack (deg) for a lift polar
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    polar: Vec<f64>,

    /// Write geometry and results as JSON
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut RunConfig) {
        if let Some(v) = self.speed { config.flow.speed = v; }
        if let Some(v) = self.alpha { config.flow.alpha_deg = v; }
        if let Some(v) = self.sweep { config.planform.sweep_deg = v; }
        if let Some(v) = self.taper { config.planform.taper = v; }
        if let Some(v) = self.dihedral { config.planform.dihedral_deg = v; }
        if let Some(v) = self.twist { config.planform.twist_deg = v; }
        if let Some(v) = self.stations { config.lattice.span_stations = v; }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::load_or_default(DEFAULT_CONFIG),
    };
    cli.apply(&mut config);

    let inputs = config.to_inputs();
    let solution = wing_vlm::solve(&inputs).context("vortex-lattice solve failed")?;
    report::print_summary(&solution);

    let polar = if cli.polar.is_empty() {
        None
    } else {
        let alphas: Vec<f64> = cli.polar.iter().map(|d| d.to_radians()).collect();
        let points = wing_vlm::polar(&inputs, &alphas).context("polar sweep failed")?;
        report::print_polar(&points);
        Some(points)
    };

    if let Some(path) = &cli.export {
        let export = report::build_export(&config, &solution, polar);
        report::write_export(path, &export)?;
    }

    Ok(())
}
