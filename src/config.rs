use serde::{Serialize, Deserialize};

use crate::data::synthetic::TwoClassMixture;
use crate::error::{Error, Result};
use crate::evidence::approximator::EvidenceApproximator;
use crate::evidence::hessian::StepPolicy;
use crate::network::spec::NetworkSpec;
use crate::train::train_config::TrainConfig;

/// Everything the figure run needs. Every field has a default, so a JSON
/// file only has to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Points drawn per class.
    pub points_per_class: usize,
    pub input_dim: usize,
    pub hidden: usize,
    pub output_dim: usize,
    pub learning_rate: f64,
    /// Training stops once successive losses differ by at most this.
    pub err_limit: f64,
    pub max_iterations: usize,
    /// How many (evidence update, retrain) rounds follow the first training.
    pub evidence_rounds: usize,
    pub fixed_point_iterations: usize,
    pub beta: f64,
    pub initial_alpha: f64,
    pub step_policy: StepPolicy,
    /// Fixes every random draw when set.
    pub seed: Option<u64>,
    pub mixture: TwoClassMixture,
    pub figure: FigureConfig,
}

/// Layout of the rendered figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub xlim: [f64; 2],
    pub ylim: [f64; 2],
    /// Grid points per axis for contour evaluation.
    pub resolution: usize,
    pub width: u32,
    pub height: u32,
    pub network_levels: Vec<f64>,
    pub truth_levels: Vec<f64>,
    pub ticks: Vec<f64>,
    pub output: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            points_per_class: 100,
            input_dim: 2,
            hidden: 8,
            output_dim: 1,
            learning_rate: 5e-4,
            err_limit: 1e-6,
            max_iterations: TrainConfig::DEFAULT_MAX_ITERATIONS,
            evidence_rounds: 2,
            fixed_point_iterations: 20,
            beta: 1.0,
            initial_alpha: 0.0,
            step_policy: StepPolicy::default(),
            seed: None,
            mixture: TwoClassMixture::default(),
            figure: FigureConfig::default(),
        }
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        FigureConfig {
            xlim: [-2.25, 2.25],
            ylim: [-3.0, 3.0],
            resolution: 150,
            width: 700,
            height: 600,
            network_levels: vec![-3.0, 0.5, 3.0],
            truth_levels: vec![-5.0, 0.0, 5.0],
            ticks: vec![-2.0, -1.0, 0.0, 1.0, 2.0],
            output: "Figure5_22.png".to_string(),
        }
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfig(msg.into())
}

impl ExperimentConfig {
    pub fn network_spec(&self) -> NetworkSpec {
        NetworkSpec::two_layer(self.input_dim, self.hidden, self.output_dim)
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.err_limit).with_max_iterations(self.max_iterations)
    }

    pub fn evidence(&self) -> EvidenceApproximator {
        EvidenceApproximator {
            beta: self.beta,
            iterations: self.fixed_point_iterations,
            step_policy: self.step_policy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.points_per_class == 0 {
            return Err(invalid("points_per_class must be positive"));
        }
        if self.input_dim != 2 {
            return Err(invalid(format!("input_dim must be 2 for planar data, got {}", self.input_dim)));
        }
        if self.hidden == 0 {
            return Err(invalid("hidden must be positive"));
        }
        if self.output_dim != 1 {
            return Err(invalid(format!("output_dim must be 1, got {}", self.output_dim)));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(invalid(format!("learning_rate must be positive, got {}", self.learning_rate)));
        }
        if !(self.err_limit.is_finite() && self.err_limit >= 0.0) {
            return Err(invalid(format!("err_limit must be non-negative, got {}", self.err_limit)));
        }
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be positive"));
        }
        if !(self.beta.is_finite() && self.beta > 0.0) {
            return Err(invalid(format!("beta must be positive, got {}", self.beta)));
        }
        if !self.initial_alpha.is_finite() {
            return Err(invalid("initial_alpha must be finite"));
        }
        if let StepPolicy::Floor { min_step } = self.step_policy {
            if !(min_step.is_finite() && min_step > 0.0) {
                return Err(invalid(format!("step_policy.min_step must be positive, got {min_step}")));
            }
        }
        self.figure.validate()
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Loads and validates a config from a JSON file.
    pub fn load_json(path: &str) -> Result<ExperimentConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: ExperimentConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

impl FigureConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.xlim[0] < self.xlim[1] && self.ylim[0] < self.ylim[1]) {
            return Err(invalid("figure limits must be increasing"));
        }
        if self.resolution < 2 {
            return Err(invalid("figure.resolution must be at least 2"));
        }
        if self.width < 16 || self.height < 16 {
            return Err(invalid("figure is too small"));
        }
        Ok(())
    }
}
