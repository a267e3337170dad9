use ferrite_bayes::{
    generate_two_class, BayesianClassifier, EvidenceApproximator, NetworkSpec, TrainConfig,
};
use ferrite_bayes::train::TrainOutcome;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Figure settings: 100 points per class, 2-8-1 network, lr 5e-4, err 1e-6.
#[test]
fn figure_settings_train_to_a_finite_loss() {
    let mut rng = StdRng::seed_from_u64(2017);
    let data = generate_two_class(100, &mut rng);
    let targets = data.target_column(0);

    let mut classifier = BayesianClassifier::new(
        &NetworkSpec::two_layer(2, 8, 1),
        5e-4,
        EvidenceApproximator::default(),
        Some(2017),
    )
    .unwrap();

    let report = classifier.train(&data.inputs, &targets, &TrainConfig::new(1e-6));

    assert!(matches!(report.outcome, TrainOutcome::Converged | TrainOutcome::IterationCap));
    assert!(report.iterations <= TrainConfig::DEFAULT_MAX_ITERATIONS);
    assert!(report.final_loss.is_finite());
    assert!(report.final_loss >= 0.0);

    let loss = classifier.loss(&data.inputs, &targets);
    assert!(loss.is_finite() && loss >= 0.0);

    let evidence = classifier.update_prior(&data.inputs, &targets).unwrap();
    assert_eq!(evidence.eigenvalues.len(), classifier.network().param_count());
    assert_eq!(classifier.alpha().to_bits(), evidence.alpha.to_bits());
    assert!(evidence.weight_norm_sq > 0.0);
}
