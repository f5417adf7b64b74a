use thiserror::Error;

/// Errors from driving a [`Simulation`][crate::sim::Simulation]. The tree operations themselves
/// never fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The tree was empty when its minimum was needed.
    #[error("cannot take the minimum of an empty tree")]
    EmptyTree,
    /// Keys are drawn from `[low, low + high)`, which needs finite bounds and `high >= 0`.
    #[error("invalid key range: low = {low}, high = {high}")]
    InvalidRange {
        /// Smallest key that can be drawn.
        low: f64,
        /// Width of the range keys are drawn from.
        high: f64,
    },
    /// A timed run needs at least one iteration to average over.
    #[error("iteration count must be at least 1")]
    NoIterations,
}
