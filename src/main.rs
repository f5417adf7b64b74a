use clap::Parser;

use splay::sim::{Config, Simulation, DEFAULT_ITERATIONS, DEFAULT_SEED, DEFAULT_SIZE};

/// Time a splay tree used as a priority queue: fill it with random keys, then repeatedly
/// remove the smallest key and insert a new random one.
#[derive(Parser, Debug)]
#[command(name = "splay")]
struct Args {
    /// Number of keys in the initial tree
    #[arg(default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Seed for the random key generator
    #[arg(default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of remove/insert steps to time
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config {
        iterations: args.iterations,
        ..Config::new(args.size, args.seed)
    };
    let mut sim = Simulation::new(config)?;
    sim.generate();
    let report = sim.run()?;

    println!("{}", report);

    Ok(())
}
