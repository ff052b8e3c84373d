//! isotope — command-line front end for the Isotope decay toolkit.
//!
//! Lists the radionuclide catalogue, answers one-shot decay questions,
//! exports sampled curves and plays decay runs in real time.

mod config;
mod output;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use isotope_core::catalogue::Catalogue;
use isotope_core::constants::MAX_CURVE_STEPS;
use isotope_core::traits::DecayModel;
use isotope_core::types::{Radionuclide, SimulationMode};
use isotope_decay::{sample_curve, CalculationMode, ExponentialDecay, FormulaReport};
use isotope_sim::{RunState, Simulation, SimulationParams, TimeScale};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::output::{sample_line, write_catalogue, write_samples, OutputFormat};

/// Radiopharmaceutical decay calculator and simulator.
#[derive(Parser)]
#[command(name = "isotope")]
#[command(version, about = "Radiopharmaceutical decay calculator and simulator")]
struct Cli {
    /// Path to a TOML config file (default: <config dir>/isotope/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format ("text" or "json"). Overrides the config file.
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the radionuclide catalogue.
    List,
    /// Show one radionuclide in detail.
    Show {
        /// Radionuclide name as listed by `isotope list`.
        name: String,
    },
    /// Activity remaining after a given time.
    Activity(ActivityArgs),
    /// Time needed to decay down to a target activity.
    TimeTo(TimeToArgs),
    /// Print the decay formula with values substituted.
    Formula(FormulaArgs),
    /// Sample the decay curve on a uniform grid.
    Curve(CurveArgs),
    /// Play a decay run in real time.
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct NuclideArgs {
    /// Radionuclide from the catalogue.
    #[arg(short, long, required_unless_present = "half_life")]
    nuclide: Option<String>,

    /// Custom half-life in hours instead of a catalogue entry.
    #[arg(long, conflicts_with = "nuclide")]
    half_life: Option<f64>,
}

#[derive(Args)]
struct ActivityArgs {
    #[command(flatten)]
    nuclide: NuclideArgs,

    /// Initial activity in MBq.
    #[arg(short, long)]
    initial: f64,

    /// Elapsed time in hours.
    #[arg(short = 't', long)]
    hours: f64,
}

#[derive(Args)]
struct TimeToArgs {
    #[command(flatten)]
    nuclide: NuclideArgs,

    /// Initial activity in MBq.
    #[arg(short, long)]
    initial: f64,

    /// Target activity in MBq.
    #[arg(short = 'a', long)]
    target: f64,
}

#[derive(Args)]
struct FormulaArgs {
    #[command(flatten)]
    nuclide: NuclideArgs,

    /// Initial activity in MBq.
    #[arg(short, long)]
    initial: f64,

    /// Elapsed time in hours (forward formula).
    #[arg(short = 't', long, required_unless_present = "target", conflicts_with = "target")]
    hours: Option<f64>,

    /// Target activity in MBq (inverse formula).
    #[arg(short = 'a', long)]
    target: Option<f64>,
}

#[derive(Args)]
struct CurveArgs {
    #[command(flatten)]
    nuclide: NuclideArgs,

    /// Initial activity in MBq.
    #[arg(short, long)]
    initial: f64,

    /// Simulated duration in hours.
    #[arg(short = 't', long)]
    hours: f64,

    /// Number of intervals; the curve has steps + 1 points.
    #[arg(
        short,
        long,
        default_value_t = 20,
        value_parser = clap::value_parser!(u64).range(1..=MAX_CURVE_STEPS as u64)
    )]
    steps: u64,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SimulateArgs {
    #[command(flatten)]
    nuclide: NuclideArgs,

    /// Initial activity in MBq.
    #[arg(short, long)]
    initial: f64,

    /// Simulated duration in hours.
    #[arg(short = 't', long)]
    hours: f64,

    /// Report when the activity falls to this value, in MBq.
    #[arg(short = 'a', long)]
    target: Option<f64>,

    /// Wall-clock minutes for the whole run (default from config).
    #[arg(short, long, conflicts_with = "speed")]
    real_minutes: Option<f64>,

    /// Simulated hours per real minute (presets: 5, 10, 15, 20).
    #[arg(long)]
    speed: Option<f64>,

    /// Save the recorded run as JSON.
    #[arg(short, long)]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.log_level, cli.log_format)?;
    init_logging(&cfg.log_level, &cfg.log_format);

    let catalogue = cfg.catalogue()?;
    info!(nuclides = catalogue.len(), "catalogue loaded");

    let model = ExponentialDecay::new();
    match cli.command {
        Commands::List => cmd_list(&catalogue),
        Commands::Show { name } => cmd_show(&catalogue, &model, &name),
        Commands::Activity(args) => cmd_activity(&catalogue, &model, args),
        Commands::TimeTo(args) => cmd_time_to(&catalogue, &model, args),
        Commands::Formula(args) => cmd_formula(&catalogue, &model, args),
        Commands::Curve(args) => cmd_curve(&catalogue, &model, args),
        Commands::Simulate(args) => cmd_simulate(&catalogue, &cfg, args).await,
    }
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so they never mix with data written to stdout.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
            .init();
    }
}

/// Resolve the radionuclide named on the command line, or build an ad-hoc one.
fn resolve_nuclide(catalogue: &Catalogue, args: &NuclideArgs) -> Result<Radionuclide> {
    if let Some(half_life) = args.half_life {
        return Radionuclide::new("custom", half_life, "#FFFFFF", "", "")
            .context("Invalid --half-life");
    }
    let Some(name) = args.nuclide.as_deref() else {
        bail!("Either --nuclide or --half-life is required");
    };
    match catalogue.require(name) {
        Ok(n) => Ok(n.clone()),
        Err(e) => bail!("{e} (available: {})", catalogue.names().join(", ")),
    }
}

fn cmd_list(catalogue: &Catalogue) -> Result<()> {
    let stdout = io::stdout();
    write_catalogue(&mut stdout.lock(), catalogue)
}

fn cmd_show(catalogue: &Catalogue, model: &dyn DecayModel, name: &str) -> Result<()> {
    let nuclide = resolve_nuclide(
        catalogue,
        &NuclideArgs {
            nuclide: Some(name.to_string()),
            half_life: None,
        },
    )?;
    let lambda = model.decay_constant(nuclide.half_life())?;

    println!("{nuclide}");
    println!("  Application:    {}", nuclide.application());
    println!("  Description:    {}", nuclide.description());
    println!("  Color:          {}", nuclide.display_color());
    println!("  Decay constant: {lambda:.6} 1/h");
    println!("  Remaining after n half-lives:");
    for n in 1..=5 {
        let pct = model.activity_after_half_lives(100.0, n as f64);
        println!(
            "    n = {n}  ({:>8.2} h)  {pct:>6.2}%",
            n as f64 * nuclide.half_life()
        );
    }
    Ok(())
}

fn cmd_activity(catalogue: &Catalogue, model: &dyn DecayModel, args: ActivityArgs) -> Result<()> {
    let nuclide = resolve_nuclide(catalogue, &args.nuclide)?;
    let half_life = nuclide.half_life();
    let activity = model.activity_at(args.initial, args.hours, half_life)?;
    let gamma = model.gamma_ratio(activity, args.initial);

    println!("{nuclide}");
    println!("  Activity:          {activity:.4} MBq");
    println!("  Remaining:         {:.2}%", model.percent_remaining(activity, args.initial));
    println!("  Gamma:             {gamma:.4}");
    println!(
        "  Half-lives elapsed: {:.4}",
        model.half_lives_elapsed(args.hours, half_life)?
    );
    Ok(())
}

fn cmd_time_to(catalogue: &Catalogue, model: &dyn DecayModel, args: TimeToArgs) -> Result<()> {
    let nuclide = resolve_nuclide(catalogue, &args.nuclide)?;
    let hours = model.time_to_activity(args.initial, args.target, nuclide.half_life())?;
    if args.target >= args.initial {
        warn!(
            target = args.target,
            initial = args.initial,
            "target is not below the initial activity; no decay needed"
        );
    }
    println!("{nuclide}");
    println!("  Time to {:.2} MBq: {hours:.4} h", args.target);
    Ok(())
}

fn cmd_formula(catalogue: &Catalogue, model: &dyn DecayModel, args: FormulaArgs) -> Result<()> {
    let nuclide = resolve_nuclide(catalogue, &args.nuclide)?;
    let mode = match (args.hours, args.target) {
        (Some(hours), _) => CalculationMode::Elapsed { hours },
        (None, Some(target_mbq)) => CalculationMode::Target { target_mbq },
        (None, None) => bail!("Either --hours or --target is required"),
    };
    let report = FormulaReport::build(model, mode, args.initial, nuclide.half_life())?;
    println!("{report}");
    println!("λ = {:.6} 1/h", report.lambda);
    Ok(())
}

fn cmd_curve(catalogue: &Catalogue, model: &dyn DecayModel, args: CurveArgs) -> Result<()> {
    let nuclide = resolve_nuclide(catalogue, &args.nuclide)?;
    let steps = usize::try_from(args.steps).context("Invalid --steps")?;
    let curve = sample_curve(model, args.initial, nuclide.half_life(), args.hours, steps)?;
    info!(nuclide = nuclide.name(), points = curve.len(), "curve sampled");

    match args.output {
        Some(path) => {
            let mut file = create_output(&path)?;
            write_samples(&mut file, &curve, args.format)?;
            file.flush()?;
            println!("Curve written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_samples(&mut stdout.lock(), &curve, args.format)?;
        }
    }
    Ok(())
}

async fn cmd_simulate(catalogue: &Catalogue, cfg: &AppConfig, args: SimulateArgs) -> Result<()> {
    let nuclide = resolve_nuclide(catalogue, &args.nuclide)?;
    let model = ExponentialDecay::new();

    let mode = match args.target {
        None => SimulationMode::Elapsed {
            horizon_hours: args.hours,
        },
        Some(target_mbq) => SimulationMode::TargetActivity {
            horizon_hours: args.hours,
            target_mbq,
        },
    };

    let mut params = SimulationParams {
        nuclide,
        initial_activity: args.initial,
        mode,
        real_minutes: args.real_minutes.unwrap_or(cfg.real_minutes),
    };
    if let Some(speed) = args.speed {
        let scale = TimeScale::new(speed)?;
        let horizon = params.horizon_hours()?;
        params.real_minutes = horizon / scale.hours_per_minute();
    }

    let mut sim = Simulation::new(isotope_sim::SystemClock::new(), model);
    let first = sim.start(params)?;

    let report = sim.formula()?;
    println!("{report}");
    println!();
    println!("{}", sample_line(&first));

    let mut interval = tokio::time::interval(Duration::from_millis(cfg.tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(sample) = sim.tick()? {
                    println!("{}", sample_line(&sample));
                }
                if !sim.is_active() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupted, stopping simulation");
                sim.stop()?;
                break;
            }
        }
    }

    if let Some(stats) = sim.stats() {
        println!();
        match sim.state() {
            RunState::Finished => println!("Simulation complete: {:.2} h simulated", stats.elapsed_hours),
            _ => println!("Simulation stopped at {:.2} h", stats.elapsed_hours),
        }
        println!("  Final activity: {:.4} MBq", stats.current_activity);
        println!("  Final gamma:    {:.4}", stats.gamma);
        println!("  Total decay:    {:.2}%", stats.percent_decayed);
        if let Some(target) = sim.params().and_then(|p| p.mode.target_mbq()) {
            match sim.target_reached_at() {
                Some(hours) => println!("  Reached {target:.2} MBq at {hours:.4} h"),
                None => println!("  {target:.2} MBq not reached"),
            }
        }
    }

    if let Some(path) = args.export {
        let record = sim.record().context("No run to export")?;
        let mut file = create_output(&path)?;
        serde_json::to_writer_pretty(&mut file, &record).context("Failed to write run record")?;
        file.flush()?;
        println!("Run exported to: {}", path.display());
    }
    Ok(())
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
