/// Binary cross-entropy, summed over samples.
///
/// Evaluated on the output logits `z` rather than on `p = sigmoid(z)`, so
/// saturated units neither produce `log(0)` nor a vanishing gradient.
pub struct BceLoss;

impl BceLoss {
    /// Scalar BCE: -Σ t·ln(p) + (1-t)·ln(1-p), with p = sigmoid(z)
    pub fn loss_from_logits(logits: &[f64], expected: &[f64]) -> f64 {
        logits.iter().zip(expected.iter())
            .map(|(&z, &t)| z.max(0.0) - z * t + (-z.abs()).exp().ln_1p())
            .sum()
    }

    /// ∂L/∂z = sigmoid(z) - t, per output
    pub fn logit_derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(p, t)| p - t)
            .collect()
    }
}
