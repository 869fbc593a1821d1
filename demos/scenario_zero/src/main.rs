//! scenario_zero: the reference heterogeneous-RAN energy scenario.
//!
//! Four mmWave small cells and one LTE macro cell over a 4 km × 4 km area,
//! three dual-stack terminals per mmWave cell.  Every terminal is attached to
//! its closest cell on each RAT, then charged processing and migration energy
//! once per accounting interval.
//!
//! The scenario can be reshaped with a TOML file (`--config`) and the flags
//! below; flags win over the file.  Logs go to stderr (`RUST_LOG` overrides
//! `--log-level`), the per-terminal report goes to stdout.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;

use hn_core::{MigrationPolicy, ScenarioConfig};
use hn_energy::{load_workloads_csv, EnergySample, EnergyTotals, FixedWorkload, Workload, WorkloadModel};
use hn_mobility::RandomWalk2d;
use hn_output::{CsvWriter, OutputWriter, SimOutputObserver, SqliteWriter};
use hn_sim::{Diagnostic, NoopObserver, Sim, SimBuilder};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Policy {
    EveryInterval,
    OnHandover,
}

impl From<Policy> for MigrationPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::EveryInterval => MigrationPolicy::EveryInterval,
            Policy::OnHandover => MigrationPolicy::OnHandover,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum Format {
    #[default]
    Csv,
    Sqlite,
}

/// Closest-cell attachment and energy accounting over an LTE + mmWave network.
#[derive(Parser, Debug)]
#[command(name = "scenario_zero")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (TOML); missing keys keep their defaults
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of accounting intervals
    #[arg(short = 'k', long)]
    intervals: Option<u32>,

    /// Master RNG seed
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Scheduler stop time, in seconds
    #[arg(long, value_name = "SECS")]
    stop_time: Option<f64>,

    /// Re-attach terminals at every interval boundary after they move
    #[arg(long)]
    reattach: bool,

    /// When migration energy is charged
    #[arg(long, value_enum)]
    policy: Option<Policy>,

    /// Per-terminal workloads (CSV: terminal_id,interval,processing_load,capacity,data_volume)
    #[arg(short = 'w', long, value_name = "FILE")]
    workloads: Option<PathBuf>,

    /// Write samples, attachments and diagnostics to this directory
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output backend used with --output-dir
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Dump samples, totals and diagnostics as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging(default_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(args: &Args) -> Result<ScenarioConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => ScenarioConfig::default(),
    };

    if let Some(k) = args.intervals {
        config.run.intervals = k;
    }
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    if let Some(stop) = args.stop_time {
        config.run.stop_time_secs = stop;
    }
    if args.reattach {
        config.run.reattach_each_interval = true;
    }
    if let Some(policy) = args.policy {
        config.run.migration_policy = policy.into();
    }

    config.validate().context("invalid scenario")?;
    Ok(config)
}

// ── Report ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct JsonReport<'a> {
    seed:        u64,
    intervals:   u32,
    totals:      EnergyTotals,
    samples:     &'a [EnergySample],
    diagnostics: &'a [Diagnostic],
}

fn report<W: WorkloadModel>(sim: &Sim<W, RandomWalk2d>, json: Option<&Path>) -> Result<()> {
    for sample in sim.samples() {
        println!("{sample}");
    }

    let totals = EnergyTotals::from_samples(sim.samples());
    println!();
    println!(
        "{} samples over {} interval(s): processing {:.3} J, migration {:.3} J, total {:.3} J",
        totals.samples,
        sim.intervals_run(),
        totals.processing,
        totals.migration,
        totals.total(),
    );
    if !sim.diagnostics().is_empty() {
        println!("{} diagnostic(s):", sim.diagnostics().len());
        for d in sim.diagnostics() {
            println!("  {d}");
        }
    }

    if let Some(path) = json {
        let doc = JsonReport {
            seed:        sim.config().run.seed,
            intervals:   sim.intervals_run(),
            totals,
            samples:     sim.samples(),
            diagnostics: sim.diagnostics().as_slice(),
        };
        let text = serde_json::to_string_pretty(&doc)?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON report");
    }
    Ok(())
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn run_with_writer<W: WorkloadModel, O: OutputWriter>(
    sim: &mut Sim<W, RandomWalk2d>,
    writer: O,
) -> Result<()> {
    let mut obs = SimOutputObserver::new(writer);
    sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("output write failed");
    }
    Ok(())
}

fn execute<W: WorkloadModel>(config: ScenarioConfig, workload: W, args: &Args) -> Result<()> {
    let walk = RandomWalk2d::from_config(config.topology.area, &config.run);
    let mut sim = SimBuilder::new(config, workload, walk).build()?;

    let t0 = Instant::now();
    match &args.output_dir {
        None => sim.run(&mut NoopObserver)?,
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            match args.format {
                Format::Csv => run_with_writer(&mut sim, CsvWriter::new(dir)?)?,
                Format::Sqlite => run_with_writer(&mut sim, SqliteWriter::new(dir)?)?,
            }
        }
    }
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "simulation complete");

    report(&sim, args.json.as_deref())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = load_config(&args)?;
    info!(
        mmwave_cells = config.topology.mmwave_cells,
        lte_cells = config.topology.lte_cells,
        terminals = config.topology.terminal_count(),
        intervals = config.run.intervals,
        seed = config.run.seed,
        "scenario loaded"
    );

    match &args.workloads {
        Some(path) => {
            let table = load_workloads_csv(path, Workload::default())
                .with_context(|| format!("failed to load workloads from {}", path.display()))?;
            info!(overrides = table.len(), "workload table loaded");
            execute(config, table, &args)
        }
        None => execute(config, FixedWorkload::default(), &args),
    }
}
