use serde::{Serialize, Deserialize};

/// Why a training run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainOutcome {
    /// Two successive losses were within `err_limit`.
    Converged,
    /// `max_iterations` reached first; the model may be under-trained.
    IterationCap,
    /// The loss became NaN or infinite.
    NonFinite,
}

/// Summary returned by `train_until_converged`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    /// Number of gradient steps taken.
    pub iterations: usize,
    /// Loss at the start of the last step.
    pub final_loss: f64,
    pub outcome: TrainOutcome,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
}
