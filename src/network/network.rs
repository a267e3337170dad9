use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::layers::dense::{Layer, LayerOutput};
use crate::math::matrix::Matrix;
use crate::network::params::{Gradients, ParamRegistry};
use crate::network::spec::NetworkSpec;

/// Feed-forward classifier ending in a Sigmoid unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    registry: ParamRegistry,
}

impl Network {
    /// Builds a network from a validated spec: standard-normal weights, zero biases.
    pub fn from_spec<R: Rng + ?Sized>(spec: &NetworkSpec, rng: &mut R) -> Result<Network> {
        spec.validate()?;
        let layers: Vec<Layer> = spec.layers.iter()
            .map(|l| Layer::new(l.size, l.input_size, l.activation, rng))
            .collect();
        let registry = ParamRegistry::from_layers(&layers);
        Ok(Network { layers, registry })
    }

    pub fn registry(&self) -> &ParamRegistry {
        &self.registry
    }

    pub fn param_count(&self) -> usize {
        self.registry.len()
    }

    /// Fresh standard-normal weights and zero biases in every layer.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for layer in &mut self.layers {
            layer.reset(rng);
        }
    }

    /// Per-layer outputs for a batch `x` (one row per sample).
    pub fn forward_pass(&self, x: &Matrix) -> Vec<LayerOutput> {
        let mut outputs: Vec<LayerOutput> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let out = match outputs.last() {
                Some(prev) => layer.feed_from(&prev.post),
                None => layer.feed_from(x),
            };
            outputs.push(out);
        }
        outputs
    }

    /// Class probabilities, `x.rows x output_dim`.
    pub fn forward(&self, x: &Matrix) -> Matrix {
        self.layers.iter().fold(x.clone(), |acc, layer| layer.feed_from(&acc).post)
    }

    /// Activations of the last hidden layer.
    pub fn hidden_forward(&self, x: &Matrix) -> Matrix {
        let hidden = &self.layers[..self.layers.len().saturating_sub(1)];
        hidden.iter().fold(x.clone(), |acc, layer| layer.feed_from(&acc).post)
    }

    /// Backward pass. `output_delta` is ∂L/∂z of the output layer; hidden
    /// layers apply their own activation derivative.
    pub fn backward(&self, x: &Matrix, outputs: &[LayerOutput], output_delta: Matrix) -> Gradients {
        let mut grads = Gradients::zeros_like(&self.layers);
        let mut delta = output_delta;

        for i in (0..self.layers.len()).rev() {
            let input_for_layer = if i == 0 { x } else { &outputs[i - 1].post };
            let (w_grad, b_grad, input_grad) =
                self.layers[i].compute_gradients(&delta, input_for_layer);
            grads.layers[i] = (w_grad, b_grad);

            if i > 0 {
                delta = self.layers[i - 1].activation_delta(&input_grad, &outputs[i - 1].pre);
            }
        }

        grads
    }

    /// `W ← W − lr·g`
    pub fn apply_gradients(&mut self, grads: &Gradients, lr: f64) {
        for (layer, (w_grad, b_grad)) in self.layers.iter_mut().zip(&grads.layers) {
            layer.apply_gradients(w_grad, b_grad, lr);
        }
    }

    /// Flat parameter snapshot in registry order.
    pub fn parameters(&self) -> Vec<f64> {
        self.layers.iter()
            .flat_map(|l| l.weights.data.iter().chain(l.biases.data.iter()).copied())
            .collect()
    }

    pub fn set_parameters(&mut self, params: &[f64]) -> Result<()> {
        if params.len() != self.param_count() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} parameters", self.param_count()),
                found: format!("{} parameters", params.len()),
            });
        }
        let mut rest = params;
        for layer in &mut self.layers {
            let (w, tail) = rest.split_at(layer.weights.len());
            let (b, tail) = tail.split_at(layer.biases.len());
            layer.weights.data.copy_from_slice(w);
            layer.biases.data.copy_from_slice(b);
            rest = tail;
        }
        Ok(())
    }

    /// Copy of this network carrying `params` instead of the current values.
    pub fn with_parameters(&self, params: &[f64]) -> Result<Network> {
        let mut net = self.clone();
        net.set_parameters(params)?;
        Ok(net)
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let mut net: Network = serde_json::from_reader(reader)?;
        net.check_shapes()?;
        net.registry = ParamRegistry::from_layers(&net.layers);
        Ok(net)
    }

    /// Every layer's matrices must agree with its declared sizes, and each
    /// layer must take the previous layer's output width.
    fn check_shapes(&self) -> Result<()> {
        let mismatch = |expected: String, found: String| Err(Error::ShapeMismatch { expected, found });

        for (i, layer) in self.layers.iter().enumerate() {
            for (what, m, shape) in [
                ("weights", &layer.weights, (layer.input_size, layer.size)),
                ("biases", &layer.biases, (1, layer.size)),
            ] {
                if m.shape() != shape || m.len() != m.rows * m.cols {
                    return mismatch(
                        format!("layer {i} {what} {}x{}", shape.0, shape.1),
                        format!("{}x{} with {} values", m.rows, m.cols, m.len()),
                    );
                }
            }
            if i > 0 && self.layers[i - 1].size != layer.input_size {
                return mismatch(
                    format!("layer {i} input size {}", self.layers[i - 1].size),
                    format!("{}", layer.input_size),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::sigmoid;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn figure_network(seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        Network::from_spec(&NetworkSpec::two_layer(2, 8, 1), &mut rng).unwrap()
    }

    #[test]
    fn forward_shapes() {
        let net = figure_network(1);
        let x = Matrix::from_rows(vec![vec![0.1, 0.2], vec![-1.0, 2.0], vec![0.0, 0.0]]);
        assert_eq!(net.forward(&x).shape(), (3, 1));
        assert_eq!(net.hidden_forward(&x).shape(), (3, 8));
        assert_eq!(net.param_count(), 33);
    }

    #[test]
    fn hidden_forward_feeds_the_output_layer() {
        let net = figure_network(2);
        let x = Matrix::from_rows(vec![vec![0.3, -0.7]]);
        let h = net.hidden_forward(&x);
        let out = manual_output(&net, &h);
        assert!((net.forward(&x)[(0, 0)] - out).abs() < 1e-15);
    }

    fn manual_output(net: &Network, h: &Matrix) -> f64 {
        let l = &net.layers[1];
        let z: f64 = (0..h.cols).map(|j| h[(0, j)] * l.weights[(j, 0)]).sum::<f64>() + l.biases[(0, 0)];
        sigmoid(z)
    }

    #[test]
    fn parameters_round_trip_through_snapshot() {
        let net = figure_network(3);
        let mut params = net.parameters();
        params[0] += 1.0;
        params[32] = 0.25;
        let other = net.with_parameters(&params).unwrap();
        assert_eq!(other.parameters(), params);
        assert_eq!(other.layers[1].biases[(0, 0)], 0.25);
        // The source network is untouched.
        assert_ne!(net.parameters(), params);
    }

    #[test]
    fn wrong_parameter_count_is_rejected() {
        let net = figure_network(4);
        assert!(matches!(net.with_parameters(&[0.0; 5]), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn network_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let path = path.to_str().unwrap();
        let net = figure_network(5);
        net.save_json(path).unwrap();
        let loaded = Network::load_json(path).unwrap();
        assert_eq!(loaded.parameters(), net.parameters());
        assert_eq!(loaded.registry(), net.registry());
    }

    fn load_edited(edit: impl FnOnce(&mut serde_json::Value)) -> Result<Network> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        let path = path.to_str().unwrap();
        let mut value = serde_json::to_value(figure_network(6)).unwrap();
        edit(&mut value);
        std::fs::write(path, serde_json::to_string(&value).unwrap()).unwrap();
        Network::load_json(path)
    }

    #[test]
    fn loading_rejects_inconsistent_weight_shapes() {
        let err = load_edited(|v| v["layers"][0]["weights"]["rows"] = 3.into());
        assert!(matches!(err, Err(Error::ShapeMismatch { .. })));

        let err = load_edited(|v| {
            v["layers"][1]["biases"]["data"].as_array_mut().unwrap().push(0.5.into())
        });
        assert!(matches!(err, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn loading_rejects_unchained_layers() {
        let err = load_edited(|v| {
            v["layers"][1]["input_size"] = 7.into();
            v["layers"][1]["weights"]["rows"] = 7.into();
            let data = v["layers"][1]["weights"]["data"].as_array_mut().unwrap();
            data.pop();
        });
        assert!(matches!(err, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn loading_accepts_an_untouched_file() {
        assert!(load_edited(|_| {}).is_ok());
    }
}
