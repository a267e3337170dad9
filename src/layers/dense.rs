use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully connected layer: `a = f(x·W + b)` over a batch of rows.
///
/// `weights` is `input_size x size`, `biases` is `1 x size`. The layer keeps
/// no forward cache, so a `&Layer` can be evaluated from anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    pub input_size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

/// Output of one layer for a batch, kept for the backward pass.
#[derive(Debug, Clone)]
pub struct LayerOutput {
    /// Pre-activation values `z = xW + b`.
    pub pre: Matrix,
    /// Activations `f(z)`.
    pub post: Matrix,
}

impl Layer {
    /// Standard-normal weights, zero biases.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        Layer {
            size,
            input_size,
            weights: Matrix::standard_normal(input_size, size, rng),
            biases: Matrix::zeros(1, size),
            activator: activation
        }
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.weights = Matrix::standard_normal(self.input_size, self.size, rng);
        self.biases = Matrix::zeros(1, self.size);
    }

    pub fn param_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    pub fn feed_from(&self, input: &Matrix) -> LayerOutput {
        let pre = (input * &self.weights).add_row(&self.biases);
        let post = pre.map(|x| self.activator.function(x));
        LayerOutput { pre, post }
    }

    /// Converts ∂L/∂a into ∂L/∂z using the stored pre-activations.
    pub fn activation_delta(&self, grad_post: &Matrix, pre: &Matrix) -> Matrix {
        let act_derivative = pre.map(|x| self.activator.derivative(x));
        grad_post.hadamard(&act_derivative)
    }

    /// Given δ = ∂L/∂z for this layer, returns (weights_grad, biases_grad,
    /// ∂L/∂input). Gradients are summed over the batch.
    pub fn compute_gradients(&self, delta: &Matrix, inputs: &Matrix) -> (Matrix, Matrix, Matrix) {
        let weights_grad = &inputs.transpose() * delta;
        let biases_grad = delta.sum_rows();
        let input_grad = delta * &self.weights.transpose();
        (weights_grad, biases_grad, input_grad)
    }

    /// Applies pre-computed gradients scaled by lr.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        self.weights = &self.weights - &weights_grad.scale(lr);
        self.biases = &self.biases - &biases_grad.scale(lr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_layer_has_zero_biases() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(8, 2, ActivationFunction::Tanh, &mut rng);
        assert_eq!(layer.weights.shape(), (2, 8));
        assert_eq!(layer.biases.shape(), (1, 8));
        assert!(layer.biases.data.iter().all(|&b| b == 0.0));
        assert_eq!(layer.param_count(), 24);
    }

    #[test]
    fn feed_from_is_affine_then_activation() {
        let layer = Layer {
            size: 1,
            input_size: 2,
            weights: Matrix::from_rows(vec![vec![1.0], vec![-2.0]]),
            biases: Matrix::from_rows(vec![vec![0.5]]),
            activator: ActivationFunction::Tanh,
        };
        let x = Matrix::from_rows(vec![vec![3.0, 1.0], vec![0.0, 0.0]]);
        let out = layer.feed_from(&x);
        assert_eq!(out.pre.data, vec![1.5, 0.5]);
        assert!((out.post.data[0] - 1.5_f64.tanh()).abs() < 1e-15);
    }

    #[test]
    fn reset_keeps_shapes_and_zeroes_biases() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut layer = Layer::new(3, 4, ActivationFunction::Sigmoid, &mut rng);
        layer.biases = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]);
        let before = layer.weights.clone();
        layer.reset(&mut rng);
        assert_eq!(layer.weights.shape(), (4, 3));
        assert_ne!(layer.weights, before);
        assert_eq!(layer.biases, Matrix::zeros(1, 3));
    }
}
