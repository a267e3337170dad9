use crate::loss::bce::BceLoss;
use crate::loss::sse::SseLoss;
use crate::math::matrix::Matrix;
use crate::network::{Gradients, Network};

/// Which loss the training loop and the Hessian differentiate.
///
/// - `Likelihood` - BCE data term only; the Hessian is taken of this.
/// - `Posterior`  - BCE + (alpha/2)·|W|²; what gradient descent minimizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Objective {
    Likelihood,
    Posterior { alpha: f64 },
}

impl Objective {
    fn alpha(&self) -> f64 {
        match self {
            Objective::Likelihood => 0.0,
            Objective::Posterior { alpha } => *alpha,
        }
    }

    /// Scalar loss without gradients.
    pub fn loss(&self, network: &Network, x: &Matrix, t: &Matrix) -> f64 {
        let outputs = network.forward_pass(x);
        let logits = match outputs.last() {
            Some(out) => &out.pre,
            None => return 0.0,
        };
        let mut loss = BceLoss::loss_from_logits(&logits.data, &t.data);
        let alpha = self.alpha();
        if alpha != 0.0 {
            loss += 0.5 * alpha * SseLoss::against_zero(&network.parameters());
        }
        loss
    }

    /// Loss and its analytic gradient for the whole batch.
    pub fn evaluate(&self, network: &Network, x: &Matrix, t: &Matrix) -> (f64, Gradients) {
        let outputs = network.forward_pass(x);
        let Some(out) = outputs.last() else {
            return (0.0, Gradients { layers: Vec::new() });
        };
        assert_eq!(out.post.shape(), t.shape(), "targets do not match network output");

        let mut loss = BceLoss::loss_from_logits(&out.pre.data, &t.data);
        let delta = Matrix::from_vec(
            t.rows,
            t.cols,
            BceLoss::logit_derivative(&out.post.data, &t.data),
        );
        let mut grads = network.backward(x, &outputs, delta);

        let alpha = self.alpha();
        if alpha != 0.0 {
            loss += 0.5 * alpha * SseLoss::against_zero(&network.parameters());
            grads.add_weight_decay(&network.layers, alpha);
        }
        (loss, grads)
    }

    /// Flat gradient in registry order.
    pub fn gradient(&self, network: &Network, x: &Matrix, t: &Matrix) -> Vec<f64> {
        self.evaluate(network, x, t).1.flatten()
    }
}
