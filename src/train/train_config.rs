use serde::{Serialize, Deserialize};

/// Stopping rule for `train_until_converged`.
///
/// # Fields
/// - `err_limit`      - stop once two successive losses differ by at most this
/// - `max_iterations` - hard cap; hitting it is logged, not an error
/// - `log_every`      - emit a `debug!` progress line every this many
///                      iterations (`0` disables)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub err_limit: f64,
    pub max_iterations: usize,
    pub log_every: usize,
}

impl TrainConfig {
    pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

    /// Creates a `TrainConfig` with the default iteration cap.
    pub fn new(err_limit: f64) -> Self {
        TrainConfig {
            err_limit,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            log_every: 1_000,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(1e-6)
    }
}
