pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod evidence;
pub mod model;
pub mod data;
pub mod render;
pub mod config;
pub mod pipeline;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, NetworkSpec};
pub use loss::Objective;
pub use optim::sgd::Sgd;
pub use train::{train_until_converged, TrainConfig, TrainReport};
pub use evidence::{EvidenceApproximator, StepPolicy};
pub use model::BayesianClassifier;
pub use data::{generate_two_class, Dataset};
pub use render::DecisionSurfaceRenderer;
pub use config::ExperimentConfig;
