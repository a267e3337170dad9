use log::{debug, info, warn};
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::evidence::fixed_point::alpha_fixed_point;
use crate::evidence::hessian::{finite_difference_hessian, StepPolicy};
use crate::loss::sse::SseLoss;
use crate::math::eigen::real_eigenvalues;
use crate::math::matrix::Matrix;
use crate::network::Network;

/// Re-estimates the weight-prior precision `alpha` with the evidence
/// (Laplace) approximation.
///
/// Each call recomputes the likelihood Hessian at the current weights, takes
/// the eigenvalues of `beta·H` and runs `iterations` steps of the
/// `alpha = gamma / |W|²` re-estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvidenceApproximator {
    pub beta: f64,
    pub iterations: usize,
    pub step_policy: StepPolicy,
}

/// What one `update_prior` call saw and produced.
#[derive(Debug, Clone)]
pub struct EvidenceReport {
    pub previous_alpha: f64,
    pub alpha: f64,
    pub gamma: f64,
    /// `|W|²` at the time of the update.
    pub weight_norm_sq: f64,
    /// Real parts of the eigenvalues of `beta·H`.
    pub eigenvalues: Vec<f64>,
}

impl Default for EvidenceApproximator {
    fn default() -> Self {
        EvidenceApproximator {
            beta: 1.0,
            iterations: 20,
            step_policy: StepPolicy::default(),
        }
    }
}

impl EvidenceApproximator {
    /// Updates `alpha` in place from the network's current weights.
    ///
    /// A Hessian that is not positive definite can drive alpha negative or
    /// off to infinity; that value is still stored, only logged.
    pub fn update_prior(
        &self,
        network: &Network,
        alpha: &mut f64,
        inputs: &Matrix,
        targets: &Matrix,
    ) -> Result<EvidenceReport> {
        let params = network.parameters();
        let weight_norm_sq = SseLoss::against_zero(&params);
        if weight_norm_sq == 0.0 {
            return Err(Error::ZeroWeightNorm);
        }

        let hessian = finite_difference_hessian(network, &params, inputs, targets, self.step_policy)?;
        let eigenvalues = real_eigenvalues(&hessian.scale(self.beta))?;

        let previous_alpha = *alpha;
        let fp = alpha_fixed_point(&eigenvalues, weight_norm_sq, previous_alpha, self.iterations);
        for (i, a) in fp.history.iter().enumerate() {
            debug!("alpha iteration {}: {a}", i + 1);
        }

        if !fp.alpha.is_finite() || fp.alpha < 0.0 {
            warn!("evidence update produced alpha = {}; Hessian is probably not positive definite", fp.alpha);
        }
        info!("alpha updated to {} (gamma = {:.4}, |W|² = {:.4})", fp.alpha, fp.gamma, weight_norm_sq);

        *alpha = fp.alpha;
        Ok(EvidenceReport {
            previous_alpha,
            alpha: fp.alpha,
            gamma: fp.gamma,
            weight_norm_sq,
            eigenvalues,
        })
    }
}
