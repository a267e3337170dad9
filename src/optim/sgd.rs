use crate::network::{Gradients, Network};

/// Plain full-batch gradient descent: no momentum, fixed step.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one weight update `W ← W − lr·g` to every layer.
    pub fn step(&self, network: &mut Network, grads: &Gradients) {
        network.apply_gradients(grads, self.learning_rate);
    }
}
