use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::ExperimentConfig;
use crate::data::dataset::Dataset;
use crate::error::Result;
use crate::evidence::approximator::EvidenceReport;
use crate::model::classifier::BayesianClassifier;
use crate::render::figure::DecisionSurfaceRenderer;
use crate::render::grid::Grid;
use crate::train::report::TrainReport;

/// Offset so the data stream and the weight stream differ under one seed.
const DATA_SEED_OFFSET: u64 = 0x5eed_da7a;

/// Everything produced by one figure run.
pub struct FigureRun {
    pub data: Dataset,
    pub classifier: BayesianClassifier,
    /// Network output before any prior update.
    pub before: Grid,
    /// Network output after the final retrain.
    pub after: Grid,
    /// First the plain run, then one per evidence round.
    pub training: Vec<TrainReport>,
    pub evidence: Vec<EvidenceReport>,
    pub renderer: DecisionSurfaceRenderer,
}

impl FigureRun {
    pub fn save_figure(&self, path: &str) -> Result<()> {
        self.renderer.save(path, &self.data, &self.before, &self.after)
    }
}

/// Generate data, train, alternate evidence updates with retraining, and
/// evaluate both decision surfaces.
pub fn run(config: &ExperimentConfig) -> Result<FigureRun> {
    config.validate()?;

    let mut data_rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(DATA_SEED_OFFSET)),
        None => StdRng::from_entropy(),
    };
    let data = config.mixture.generate(config.points_per_class, &mut data_rng);
    let targets = data.target_column(0);
    info!("generated {} points ({} per class)", data.len(), config.points_per_class);

    let mut classifier = BayesianClassifier::from_config(config)?;
    let renderer = DecisionSurfaceRenderer::new(config.figure.clone());
    let train_config = config.train_config();

    let mut training = vec![classifier.train(&data.inputs, &targets, &train_config)];
    let before = renderer.evaluate(classifier.network());

    let mut evidence = Vec::with_capacity(config.evidence_rounds);
    for round in 1..=config.evidence_rounds {
        info!("evidence round {round}/{}", config.evidence_rounds);
        evidence.push(classifier.update_prior(&data.inputs, &targets)?);
        training.push(classifier.train(&data.inputs, &targets, &train_config));
    }
    let after = renderer.evaluate(classifier.network());

    Ok(FigureRun { data, classifier, before, after, training, evidence, renderer })
}
