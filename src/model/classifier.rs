use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::ExperimentConfig;
use crate::error::Result;
use crate::evidence::approximator::{EvidenceApproximator, EvidenceReport};
use crate::loss::objective::Objective;
use crate::math::matrix::Matrix;
use crate::network::{Network, NetworkSpec};
use crate::optim::sgd::Sgd;
use crate::train::{train_until_converged, TrainConfig, TrainReport};

/// The network together with its Bayesian hyperparameters.
///
/// Owns all mutable state of a run: the weights, `alpha`, and the random
/// source used for (re)initialization. Training and evidence updates borrow
/// it mutably.
#[derive(Debug, Clone)]
pub struct BayesianClassifier {
    network: Network,
    alpha: f64,
    optimizer: Sgd,
    evidence: EvidenceApproximator,
    rng: StdRng,
}

impl BayesianClassifier {
    /// `seed = None` draws the initial weights (and every reset) from entropy.
    pub fn new(
        spec: &NetworkSpec,
        learning_rate: f64,
        evidence: EvidenceApproximator,
        seed: Option<u64>,
    ) -> Result<BayesianClassifier> {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let network = Network::from_spec(spec, &mut rng)?;
        Ok(BayesianClassifier {
            network,
            alpha: 0.0,
            optimizer: Sgd::new(learning_rate),
            evidence,
            rng,
        })
    }

    pub fn from_config(config: &ExperimentConfig) -> Result<BayesianClassifier> {
        let mut classifier = BayesianClassifier::new(
            &config.network_spec(),
            config.learning_rate,
            config.evidence(),
            config.seed,
        )?;
        classifier.alpha = config.initial_alpha;
        Ok(classifier)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.evidence.beta
    }

    pub fn hidden_size(&self) -> usize {
        self.network.layers.first().map_or(0, |l| l.size)
    }

    /// Class probabilities for each row of `x`.
    pub fn predict(&self, x: &Matrix) -> Matrix {
        self.network.forward(x)
    }

    pub fn hidden_units(&self, x: &Matrix) -> Matrix {
        self.network.hidden_forward(x)
    }

    /// Regularized loss `BCE + alpha/2 |W|²`.
    pub fn loss(&self, x: &Matrix, t: &Matrix) -> f64 {
        Objective::Posterior { alpha: self.alpha }.loss(&self.network, x, t)
    }

    /// Data term only.
    pub fn likelihood_loss(&self, x: &Matrix, t: &Matrix) -> f64 {
        Objective::Likelihood.loss(&self.network, x, t)
    }

    /// Gradient descent on the regularized loss with the current alpha.
    pub fn train(&mut self, x: &Matrix, t: &Matrix, config: &TrainConfig) -> TrainReport {
        let report = train_until_converged(
            &mut self.network,
            x,
            t,
            &self.optimizer,
            Objective::Posterior { alpha: self.alpha },
            config,
        );
        info!(
            "training loss for M={}: {:.6} after {} iterations ({:?}, {} ms)",
            self.hidden_size(),
            report.final_loss,
            report.iterations,
            report.outcome,
            report.elapsed_ms
        );
        info!("alpha: {}", self.alpha);
        report
    }

    /// Re-estimates alpha from the current weights.
    pub fn update_prior(&mut self, x: &Matrix, t: &Matrix) -> Result<EvidenceReport> {
        self.evidence.update_prior(&self.network, &mut self.alpha, x, t)
    }

    /// New standard-normal weights and zero biases; alpha is kept.
    pub fn reset_weights(&mut self) {
        self.network.reset(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(seed: Option<u64>) -> BayesianClassifier {
        BayesianClassifier::new(
            &NetworkSpec::two_layer(2, 8, 1),
            5e-4,
            EvidenceApproximator::default(),
            seed,
        )
        .unwrap()
    }

    fn sample_inputs() -> Matrix {
        Matrix::from_rows(vec![vec![0.4, -1.3], vec![1.0, 1.0]])
    }

    #[test]
    fn reset_draws_new_weights() {
        let mut c = classifier(None);
        c.reset_weights();
        let first = c.predict(&sample_inputs());
        c.reset_weights();
        let second = c.predict(&sample_inputs());
        assert_ne!(first, second);
        assert!(c.network().layers.iter().all(|l| l.biases.data.iter().all(|&b| b == 0.0)));
    }

    #[test]
    fn same_seed_gives_same_weights() {
        let a = classifier(Some(12));
        let b = classifier(Some(12));
        assert_eq!(a.predict(&sample_inputs()), b.predict(&sample_inputs()));
        let c = classifier(Some(13));
        assert_ne!(a.predict(&sample_inputs()), c.predict(&sample_inputs()));
    }

    #[test]
    fn starts_with_zero_alpha_and_unit_beta() {
        let c = classifier(Some(1));
        assert_eq!(c.alpha(), 0.0);
        assert_eq!(c.beta(), 1.0);
        assert_eq!(c.hidden_units(&sample_inputs()).shape(), (2, 8));
        let t = Matrix::from_rows(vec![vec![1.0], vec![0.0]]);
        // With alpha = 0 the regularized and likelihood losses agree.
        assert_eq!(c.loss(&sample_inputs(), &t), c.likelihood_loss(&sample_inputs(), &t));
    }

    #[test]
    fn from_config_applies_initial_alpha_and_seed() {
        let config = ExperimentConfig { initial_alpha: 0.25, seed: Some(4), ..Default::default() };
        let a = BayesianClassifier::from_config(&config).unwrap();
        let b = BayesianClassifier::from_config(&config).unwrap();
        assert_eq!(a.alpha(), 0.25);
        assert_eq!(a.network().parameters(), b.network().parameters());
    }
}
