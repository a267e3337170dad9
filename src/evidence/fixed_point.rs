/// Effective number of well-determined parameters,
/// `gamma = Σ λ_k / (alpha + λ_k)`.
///
/// A term with `alpha + λ_k == 0` (a flat direction while alpha is still 0)
/// contributes nothing.
pub fn effective_parameters(eigenvalues: &[f64], alpha: f64) -> f64 {
    eigenvalues.iter()
        .map(|&l| {
            let denom = alpha + l;
            if denom == 0.0 { 0.0 } else { l / denom }
        })
        .sum()
}

/// Result of iterating the evidence re-estimation equations.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPoint {
    pub alpha: f64,
    pub gamma: f64,
    /// alpha after each step, first to last.
    pub history: Vec<f64>,
}

/// Iterates `gamma = Σ λ/(alpha + λ)`, `alpha = gamma / d` exactly
/// `iterations` times starting from `initial_alpha`.
///
/// Convergence is not checked; whatever the last step produces is returned.
pub fn alpha_fixed_point(
    eigenvalues: &[f64],
    weight_norm_sq: f64,
    initial_alpha: f64,
    iterations: usize,
) -> FixedPoint {
    let mut alpha = initial_alpha;
    let mut gamma = effective_parameters(eigenvalues, alpha);
    let mut history = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        gamma = effective_parameters(eigenvalues, alpha);
        alpha = gamma / weight_norm_sq;
        history.push(alpha);
    }

    FixedPoint { alpha, gamma, history }
}
