//! A priority-queue workload for the splay tree (the "hold model").
//!
//! The tree is filled with random timestamps. Then each step dequeues the smallest timestamp
//! and enqueues a fresh random one, and a run times a fixed number of steps.
//!
//! ```
//! use splay::sim::{Config, Simulation};
//!
//! let mut sim = Simulation::new(Config::new(100, 42)).unwrap();
//! sim.generate();
//!
//! let report = sim.run().unwrap();
//! assert_eq!(report.iterations, sim.config().iterations);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;
use crate::render;
use crate::tree::{Node, Tree};

/// Number of keys in the initial tree unless told otherwise.
pub const DEFAULT_SIZE: usize = 1000;

/// Seed for the key generator unless told otherwise.
pub const DEFAULT_SEED: u64 = 831_970_590;

/// Number of timed dequeue/enqueue steps. Fewer when every step is being drawn.
pub const DEFAULT_ITERATIONS: usize = if cfg!(feature = "trace-tree") { 10 } else { 100 };

/// An `f64` key with a total order (see [`f64::total_cmp`]) so it can live in a [`Tree`].
#[derive(Clone, Copy, Debug)]
pub struct Timestamp(f64);

impl Timestamp {
    /// The wrapped value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Timestamp {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_general(f, self.0)
    }
}

/// Writes `value` like C's `%g`: six significant digits with trailing zeros trimmed, switching to
/// exponent notation for exponents below -4 or from 6 up.
fn write_general(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let exponent = if value == 0.0 || !value.is_finite() {
        0
    } else {
        value.abs().log10().floor() as i32
    };

    if exponent < -4 || exponent >= 6 {
        let s = format!("{:.5e}", value);
        let (mantissa, exponent) = s.split_at(s.find('e').unwrap_or(s.len()));
        f.write_str(mantissa.trim_end_matches('0').trim_end_matches('.'))?;
        return f.write_str(exponent);
    }

    let decimals = (5 - exponent).max(0) as usize;
    let s = format!("{:.*}", decimals, value);
    if s.contains('.') {
        f.write_str(s.trim_end_matches('0').trim_end_matches('.'))
    } else {
        f.write_str(&s)
    }
}

/// Knobs for a [`Simulation`].
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of keys inserted by [`Simulation::generate`].
    pub size: usize,
    /// Seed for the key generator. The same seed always yields the same keys.
    pub seed: u64,
    /// Number of steps timed by [`Simulation::run`].
    pub iterations: usize,
    /// Smallest key that can be drawn.
    pub low: f64,
    /// Width of the range keys are drawn from, i.e. keys fall in `[low, low + high)`.
    pub high: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SEED)
    }
}

impl Config {
    /// A config drawing keys from `[1, 1 + size)`.
    pub fn new(size: usize, seed: u64) -> Self {
        Self {
            size,
            seed,
            iterations: DEFAULT_ITERATIONS,
            low: 1.0,
            high: size as f64,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if !self.low.is_finite() || !self.high.is_finite() || self.high < 0.0 {
            return Err(Error::InvalidRange {
                low: self.low,
                high: self.high,
            });
        }
        if self.iterations == 0 {
            return Err(Error::NoIterations);
        }

        Ok(())
    }
}

/// Timing results of [`Simulation::run`].
#[derive(Clone, Debug)]
pub struct Report {
    /// Number of steps that were timed.
    pub iterations: usize,
    /// Wall-clock time for all steps.
    pub elapsed: Duration,
    /// Average time of one dequeue/enqueue step.
    pub per_iteration: Duration,
    /// Memory taken by the configured number of nodes.
    pub node_bytes: usize,
}

impl fmt::Display for Report {
    /// The two summary lines: seconds per step and node memory in bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("time elapsed: ")?;
        write_general(f, self.per_iteration.as_secs_f64())?;
        write!(f, "\nsize: {}", self.node_bytes)
    }
}

/// A splay tree used as a priority queue of [`Timestamp`]s plus the generator feeding it.
pub struct Simulation {
    config: Config,
    rng: StdRng,
    tree: Tree<Timestamp>,
}

impl Simulation {
    /// Creates a simulation with an empty tree.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRange`] or [`Error::NoIterations`] if `config` can't be run.
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            tree: Tree::new(),
        })
    }

    /// The config this simulation was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The tree as it currently stands.
    pub fn tree(&self) -> &Tree<Timestamp> {
        &self.tree
    }

    /// Inserts `config.size` random keys. Duplicate draws are absorbed by the tree so it can end
    /// up slightly smaller.
    pub fn generate(&mut self) {
        for _ in 0..self.config.size {
            let timestamp = self.next_timestamp();
            self.update(|tree| tree.insert(timestamp));
        }

        info!(
            "generated {} keys (seed {})",
            self.config.size, self.config.seed
        );
        self.log_tree("first print");
    }

    /// Dequeues the smallest key and enqueues a new random one. Returns the dequeued key.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if there is nothing to dequeue. The tree is left as it was.
    pub fn step(&mut self) -> Result<Timestamp, Error> {
        let min = *self.tree.find_min().ok_or(Error::EmptyTree)?;
        self.update(|tree| tree.delete(&min));
        self.log_tree("after remove");

        let timestamp = self.next_timestamp();
        self.update(|tree| tree.insert(timestamp));
        self.log_tree("after insert");

        trace!("dequeued {}, enqueued {}", min, timestamp);
        Ok(min)
    }

    /// Times `config.iterations` calls to [`step`][Simulation::step].
    ///
    /// # Errors
    ///
    /// [`Error::EmptyTree`] if the tree is empty, e.g. because `config.size` is 0.
    pub fn run(&mut self) -> Result<Report, Error> {
        let iterations = self.config.iterations;
        let start = Instant::now();
        for _ in 0..iterations {
            self.step()?;
        }
        let elapsed = start.elapsed();
        self.log_tree("last print");

        let report = Report {
            iterations,
            elapsed,
            per_iteration: elapsed.div_f64(iterations as f64),
            node_bytes: mem::size_of::<Node<Timestamp>>() * self.config.size,
        };
        info!(
            "{} iterations in {:?} ({:?} each)",
            report.iterations, report.elapsed, report.per_iteration
        );

        Ok(report)
    }

    fn next_timestamp(&mut self) -> Timestamp {
        Timestamp(self.config.low + self.config.high * self.rng.gen::<f64>())
    }

    fn update(&mut self, f: impl FnOnce(Tree<Timestamp>) -> Tree<Timestamp>) {
        self.tree = f(mem::take(&mut self.tree));
    }

    fn log_tree(&self, stage: &str) {
        if cfg!(feature = "trace-tree") {
            debug!("{}\n{}", stage, render::to_ascii(&self.tree));
        }
    }
}
