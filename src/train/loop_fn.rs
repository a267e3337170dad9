use std::time::Instant;

use log::{debug, trace, warn};

use crate::loss::objective::Objective;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::report::{TrainOutcome, TrainReport};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::gradient_step;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Runs full-batch gradient descent on `objective` until two successive
/// losses differ by at most `config.err_limit`, or `config.max_iterations`
/// steps have been taken.
///
/// The first step always runs: there is no previous loss to compare against
/// until one has been computed. Hitting the iteration cap or a non-finite
/// loss is reported in the returned `TrainReport`, never as an error.
///
/// # Panics
/// Panics if `inputs` and `targets` have different row counts.
pub fn train_until_converged(
    network: &mut Network,
    inputs: &Matrix,
    targets: &Matrix,
    optimizer: &Sgd,
    objective: Objective,
    config: &TrainConfig,
) -> TrainReport {
    assert_eq!(
        inputs.rows,
        targets.rows,
        "inputs and targets must have equal length"
    );

    let t_start = Instant::now();
    let mut previous: Option<f64> = None;
    let mut iterations = 0;
    let mut loss;

    let outcome = loop {
        loss = gradient_step(network, inputs, targets, optimizer, objective);
        iterations += 1;
        trace!("iteration {iterations}: loss = {loss}");

        if !loss.is_finite() {
            warn!("loss became non-finite ({loss}) after {iterations} iterations");
            break TrainOutcome::NonFinite;
        }

        if let Some(prev) = previous {
            if (loss - prev).abs() <= config.err_limit {
                break TrainOutcome::Converged;
            }
        }
        previous = Some(loss);

        if iterations >= config.max_iterations {
            warn!("iteration break: no convergence after {iterations} iterations (loss = {loss:.6})");
            break TrainOutcome::IterationCap;
        }

        if config.log_every > 0 && iterations % config.log_every == 0 {
            debug!("iteration {iterations}: loss = {loss:.8}");
        }
    };

    TrainReport {
        iterations,
        final_loss: loss,
        outcome,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    }
}
