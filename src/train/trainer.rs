use crate::{
    loss::objective::Objective,
    math::matrix::Matrix,
    network::network::Network,
    optim::sgd::Sgd,
};

/// One full-batch gradient-descent step on `objective`.
///
/// Returns the loss evaluated *before* the update.
pub fn gradient_step(
    network: &mut Network,
    inputs: &Matrix,
    targets: &Matrix,
    optimizer: &Sgd,
    objective: Objective,
) -> f64 {
    let (loss, grads) = objective.evaluate(network, inputs, targets);
    optimizer.step(network, &grads);
    loss
}
