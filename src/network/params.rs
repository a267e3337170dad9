use serde::{Serialize, Deserialize};

use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamRole {
    Weight,
    Bias,
}

/// One named parameter tensor inside the flat parameter vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamEntry {
    pub name: String,
    pub layer: usize,
    pub role: ParamRole,
    pub shape: (usize, usize),
    /// Start of this tensor in the flat vector.
    pub offset: usize,
}

impl ParamEntry {
    pub fn len(&self) -> usize {
        self.shape.0 * self.shape.1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len()
    }
}

/// Ordered layout of every parameter of a network.
///
/// Order is `layer0.weight, layer0.bias, layer1.weight, layer1.bias, ...`,
/// each tensor flattened row-major. Built once when the network is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamRegistry {
    entries: Vec<ParamEntry>,
    total: usize,
}

impl ParamRegistry {
    pub fn from_layers(layers: &[Layer]) -> ParamRegistry {
        let mut entries = Vec::with_capacity(layers.len() * 2);
        let mut offset = 0;
        for (i, layer) in layers.iter().enumerate() {
            for (role, m) in [(ParamRole::Weight, &layer.weights), (ParamRole::Bias, &layer.biases)] {
                let suffix = match role {
                    ParamRole::Weight => "weight",
                    ParamRole::Bias => "bias",
                };
                entries.push(ParamEntry {
                    name: format!("linear{}.{suffix}", i + 1),
                    layer: i,
                    role,
                    shape: m.shape(),
                    offset,
                });
                offset += m.len();
            }
        }
        ParamRegistry { entries, total: offset }
    }

    pub fn entries(&self) -> &[ParamEntry] {
        &self.entries
    }

    /// Total parameter count N.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Entry owning flat index `index`.
    pub fn locate(&self, index: usize) -> Option<&ParamEntry> {
        self.entries.iter().find(|e| e.range().contains(&index))
    }
}

/// Per-layer `(weights_grad, biases_grad)`, same shapes as the layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub layers: Vec<(Matrix, Matrix)>,
}

impl Gradients {
    pub fn zeros_like(layers: &[Layer]) -> Gradients {
        Gradients {
            layers: layers.iter()
                .map(|l| (
                    Matrix::zeros(l.weights.rows, l.weights.cols),
                    Matrix::zeros(l.biases.rows, l.biases.cols),
                ))
                .collect(),
        }
    }

    /// Flattened in registry order.
    pub fn flatten(&self) -> Vec<f64> {
        self.layers.iter()
            .flat_map(|(w, b)| w.data.iter().chain(b.data.iter()).copied())
            .collect()
    }

    /// `g += alpha * W` for every parameter (gradient of `alpha/2 |W|²`).
    pub fn add_weight_decay(&mut self, layers: &[Layer], alpha: f64) {
        for ((w_grad, b_grad), layer) in self.layers.iter_mut().zip(layers) {
            *w_grad = &*w_grad + &layer.weights.scale(alpha);
            *b_grad = &*b_grad + &layer.biases.scale(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn figure_layers() -> Vec<Layer> {
        let mut rng = StdRng::seed_from_u64(0);
        vec![
            Layer::new(8, 2, ActivationFunction::Tanh, &mut rng),
            Layer::new(1, 8, ActivationFunction::Sigmoid, &mut rng),
        ]
    }

    #[test]
    fn registry_orders_weights_before_biases_per_layer() {
        let reg = ParamRegistry::from_layers(&figure_layers());
        let names: Vec<_> = reg.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["linear1.weight", "linear1.bias", "linear2.weight", "linear2.bias"]);
        assert_eq!(reg.len(), 16 + 8 + 8 + 1);
        let roles: Vec<_> = reg.entries().iter().map(|e| e.role).collect();
        assert_eq!(roles, [ParamRole::Weight, ParamRole::Bias, ParamRole::Weight, ParamRole::Bias]);
    }

    #[test]
    fn locate_maps_flat_index_to_tensor() {
        let reg = ParamRegistry::from_layers(&figure_layers());
        assert_eq!(reg.locate(0).map(|e| e.name.as_str()), Some("linear1.weight"));
        assert_eq!(reg.locate(16).map(|e| e.role), Some(ParamRole::Bias));
        assert_eq!(reg.locate(32).map(|e| e.name.as_str()), Some("linear2.bias"));
        assert!(reg.locate(33).is_none());
    }

    #[test]
    fn weight_decay_adds_scaled_parameters() {
        let layers = figure_layers();
        let mut g = Gradients::zeros_like(&layers);
        g.add_weight_decay(&layers, 2.0);
        assert_eq!(g.layers[0].0, layers[0].weights.scale(2.0));
        assert_eq!(g.layers[1].1, Matrix::zeros(1, 1));
    }
}
