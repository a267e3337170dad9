use log::debug;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::loss::objective::Objective;
use crate::math::matrix::Matrix;
use crate::network::{Network, ParamRegistry};

/// Perturbation size relative to the coordinate being perturbed.
pub const RELATIVE_STEP: f64 = 1e-8;

/// Default floor: only catches steps from zero or subnormal-scale weights.
pub const DEFAULT_MIN_STEP: f64 = 1e-12;

/// What to do when `w · RELATIVE_STEP` is too small to divide by.
///
/// A zero coordinate gives a zero step, and the central difference
/// `(g(+) − g(−)) / 2ε` is then undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepPolicy {
    /// Use `min_step` whenever `|w · RELATIVE_STEP| < min_step`.
    Floor { min_step: f64 },
    /// Leave the column at zero when the step is exactly zero.
    Skip,
}

impl Default for StepPolicy {
    fn default() -> Self {
        StepPolicy::Floor { min_step: DEFAULT_MIN_STEP }
    }
}

impl StepPolicy {
    /// Signed step for coordinate value `w`, or `None` to skip it.
    pub fn step_for(&self, w: f64) -> Option<f64> {
        let eps = w * RELATIVE_STEP;
        match *self {
            StepPolicy::Floor { min_step } if eps.abs() < min_step => Some(min_step),
            StepPolicy::Floor { .. } => Some(eps),
            StepPolicy::Skip if eps == 0.0 => None,
            StepPolicy::Skip => Some(eps),
        }
    }
}

/// Central-difference Jacobian of `f` at `params`.
///
/// Column `j` is `(f(p + ε_j e_j) − f(p − ε_j e_j)) / (2 ε_j)` with `ε_j` from
/// `policy`. `params` is only read; each evaluation gets its own perturbed
/// copy.
pub fn finite_difference_jacobian<F>(
    mut f: F,
    params: &[f64],
    policy: StepPolicy,
) -> Result<Matrix>
where
    F: FnMut(&[f64]) -> Result<Vec<f64>>,
{
    let n = params.len();
    let mut jacobian: Option<Matrix> = None;
    let mut perturbed = params.to_vec();

    for j in 0..n {
        let Some(eps) = policy.step_for(params[j]) else {
            continue;
        };

        perturbed[j] = params[j] - eps;
        let minus = f(&perturbed)?;
        perturbed[j] = params[j] + eps;
        let plus = f(&perturbed)?;
        perturbed[j] = params[j];

        if minus.len() != plus.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} outputs", minus.len()),
                found: format!("{} outputs", plus.len()),
            });
        }
        let jac = jacobian.get_or_insert_with(|| Matrix::zeros(plus.len(), n));
        if jac.rows != plus.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} outputs", jac.rows),
                found: format!("{} outputs", plus.len()),
            });
        }
        for (i, (p, m)) in plus.iter().zip(&minus).enumerate() {
            jac[(i, j)] = (p - m) / (2.0 * eps);
        }
    }

    match jacobian {
        Some(jac) => Ok(jac),
        // Every coordinate skipped: evaluate once just to learn the output size.
        None => Ok(Matrix::zeros(f(params)?.len(), n)),
    }
}

/// Hessian of the likelihood (data term only) w.r.t. every parameter, by
/// central differences of the analytic gradient.
///
/// `params` is the parameter snapshot to differentiate at, in the network's
/// registry order; `network` supplies the architecture and is not modified.
pub fn finite_difference_hessian(
    network: &Network,
    params: &[f64],
    inputs: &Matrix,
    targets: &Matrix,
    policy: StepPolicy,
) -> Result<Matrix> {
    let skipped = skipped_coordinates(network.registry(), params, policy);
    if !skipped.is_empty() {
        debug!("Hessian columns left at zero: {}", skipped.join(", "));
    }

    let mut scratch = network.with_parameters(params)?;
    finite_difference_jacobian(
        |p| {
            scratch.set_parameters(p)?;
            Ok(Objective::Likelihood.gradient(&scratch, inputs, targets))
        },
        params,
        policy,
    )
}

/// Names of the coordinates `policy` gives no step, e.g. `linear1.bias[3]`.
pub fn skipped_coordinates(registry: &ParamRegistry, params: &[f64], policy: StepPolicy) -> Vec<String> {
    params.iter()
        .enumerate()
        .filter(|&(_, &w)| policy.step_for(w).is_none())
        .filter_map(|(j, _)| {
            registry.locate(j).map(|e| format!("{}[{}]", e.name, j - e.offset))
        })
        .collect()
}
