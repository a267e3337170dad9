use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       - number of neurons in this layer
/// - `input_size` - output size of the previous layer, or the raw input
///                  dimension for the first layer
/// - `activation` - activation function applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

/// Serializable description of a network architecture.
///
/// The output layer must be `Sigmoid`: training pairs it with binary
/// cross-entropy and backpropagates the combined `p - t` gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// linear → tanh → linear → sigmoid
    pub fn two_layer(input_dim: usize, hidden: usize, output_dim: usize) -> NetworkSpec {
        NetworkSpec {
            layers: vec![
                LayerSpec { size: hidden, input_size: input_dim, activation: ActivationFunction::Tanh },
                LayerSpec { size: output_dim, input_size: hidden, activation: ActivationFunction::Sigmoid },
            ],
        }
    }

    pub fn validate(&self) -> Result<()> {
        let Some(last) = self.layers.last() else {
            return Err(Error::InvalidConfig("network has no layers".to_string()));
        };
        if last.activation != ActivationFunction::Sigmoid {
            return Err(Error::InvalidConfig(format!(
                "output layer must be Sigmoid, got {:?}",
                last.activation
            )));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.size == 0 || layer.input_size == 0 {
                return Err(Error::InvalidConfig(format!("layer {i} has a zero dimension")));
            }
            if i > 0 && self.layers[i - 1].size != layer.input_size {
                return Err(Error::InvalidConfig(format!(
                    "layer {i} expects {} inputs but layer {} has {} outputs",
                    layer.input_size,
                    i - 1,
                    self.layers[i - 1].size
                )));
            }
        }
        Ok(())
    }
}
