//! split_optimizer: search the edge/central association split that minimizes
//! total processing plus migration energy, using flower pollination.
//!
//! Runs on the two-edge / two-central / two-distributed-unit reference
//! parameters.  Prints the best fitness every `--every` generations, then the
//! best association vector and its energy breakdown.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use hn_core::SimRng;
use hn_energy::{FlowerPollination, SplitEnergyObjective};

/// Flower-pollination search over the edge/central split energy objective.
#[derive(Parser, Debug)]
#[command(name = "split_optimizer")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of generations
    #[arg(short = 'g', long, default_value_t = 100)]
    generations: usize,

    /// Flowers per generation
    #[arg(short = 'n', long, default_value_t = 20)]
    population: usize,

    /// Number of decision variables, each in [0, 1]
    #[arg(short = 'd', long, default_value_t = 4)]
    dims: usize,

    /// Probability of a global pollination step
    #[arg(short = 'p', long, default_value_t = 0.8)]
    switch_probability: f64,

    /// RNG seed
    #[arg(short = 's', long, default_value_t = 42)]
    seed: u64,

    /// Print convergence every N generations (0 prints only the result)
    #[arg(long, default_value_t = 10)]
    every: usize,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(default_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let objective = SplitEnergyObjective::reference();
    let mut fpa = FlowerPollination::new(args.generations, args.population, vec![(0.0, 1.0); args.dims]);
    fpa.switch_probability = args.switch_probability;

    info!(
        generations = fpa.generations,
        population = fpa.population,
        dims = args.dims,
        seed = args.seed,
        "starting search"
    );
    let mut rng = SimRng::new(args.seed);
    let optimum = fpa.minimize(&objective, &mut rng)?;

    if args.every > 0 {
        for (generation, fitness) in optimum.convergence.iter().enumerate().step_by(args.every) {
            println!("generation {generation:>4}: best = {fitness:.4} J");
        }
    }

    let processing = objective.processing_energy()?;
    let migration = objective.migration_energy(&optimum.best);
    let association: Vec<String> = optimum.best.iter().map(|a| format!("{a:.4}")).collect();
    println!();
    println!("best association : [{}]", association.join(", "));
    println!("processing energy: {processing:.4} J");
    println!("migration energy : {migration:.4} J");
    println!("total energy     : {:.4} J", optimum.best_fitness);

    Ok(())
}
