use ferrite_bayes::{Matrix, Network, NetworkSpec};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn figure_network() -> Network {
    let mut rng = StdRng::seed_from_u64(0);
    Network::from_spec(&NetworkSpec::two_layer(2, 8, 1), &mut rng).unwrap()
}

proptest! {
    #[test]
    fn forward_stays_inside_the_unit_interval(
        params in prop::collection::vec(-1.5f64..1.5, 33),
        x in -3.0f64..3.0,
        y in -3.0f64..3.0,
    ) {
        let net = figure_network().with_parameters(&params).unwrap();
        let p = net.forward(&Matrix::from_rows(vec![vec![x, y]]))[(0, 0)];
        prop_assert!(p > 0.0 && p < 1.0, "p = {}", p);
    }

    #[test]
    fn hidden_units_stay_inside_tanh_range(
        params in prop::collection::vec(-1.5f64..1.5, 33),
        x in -3.0f64..3.0,
        y in -3.0f64..3.0,
    ) {
        let net = figure_network().with_parameters(&params).unwrap();
        let h = net.hidden_forward(&Matrix::from_rows(vec![vec![x, y]]));
        prop_assert!(h.data.iter().all(|v| v.abs() <= 1.0));
    }
}
