use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::data::dataset::Dataset;
use crate::math::gaussian::Gaussian2;
use crate::math::matrix::Matrix;

/// Two overlapping classes: class 0 is a single Gaussian, class 1 a
/// two-component mixture whose split is itself random.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoClassMixture {
    pub class_zero: Gaussian2,
    pub class_one: [Gaussian2; 2],
    /// Standard deviation of the number of class-1 points drawn from the
    /// first component (mean `n / 2`).
    pub split_std_dev: f64,
}

impl Default for TwoClassMixture {
    fn default() -> Self {
        TwoClassMixture {
            class_zero: Gaussian2::new([-0.25, 0.0], [[1.0, 1.0], [0.0, 1.0]]),
            class_one: [
                Gaussian2::new([1.0, -0.75], [[1.0, 0.8], [0.8, 1.0]]),
                Gaussian2::new([1.0, 1.0], [[1.0, 1.0], [0.0, 1.0]]),
            ],
            split_std_dev: 5.0,
        }
    }
}

impl TwoClassMixture {
    /// Draws `n` points per class. Rows `0..n` are class 0, rows `n..2n`
    /// class 1; targets are one-hot with two columns.
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Dataset {
        let mut inputs = Matrix::zeros(2 * n, 2);
        let mut targets = Matrix::zeros(2 * n, 2);

        let split = n as f64 / 2.0 + self.split_std_dev * Matrix::sample_standard_normal(rng);
        let m = split.trunc().clamp(0.0, n as f64) as usize;

        let points = self.class_zero.sample_n(n, rng).into_iter()
            .chain(self.class_one[0].sample_n(m, rng))
            .chain(self.class_one[1].sample_n(n - m, rng));

        for (i, p) in points.enumerate() {
            inputs[(i, 0)] = p[0];
            inputs[(i, 1)] = p[1];
            let class = if i < n { 0 } else { 1 };
            targets[(i, class)] = 1.0;
        }

        Dataset { inputs, targets }
    }
}

/// The figure's data set with the default mixture.
pub fn generate_two_class<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Dataset {
    TwoClassMixture::default().generate(n, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shapes_and_one_hot_targets() {
        let mut rng = StdRng::seed_from_u64(5);
        let data = generate_two_class(100, &mut rng);
        assert_eq!(data.len(), 200);
        assert_eq!(data.targets.shape(), (200, 2));
        for i in 0..200 {
            let row = data.targets.row(i);
            assert_eq!(row.iter().sum::<f64>(), 1.0);
            assert_eq!(row[0] == 1.0, i < 100);
        }
        assert_eq!(data.class_points(0).len(), 100);
        assert_eq!(data.class_points(1).len(), 100);
        assert_eq!(data.target_column(0).sum(), 100.0);
    }

    #[test]
    fn class_means_follow_the_mixture() {
        let mut rng = StdRng::seed_from_u64(6);
        let data = generate_two_class(2_000, &mut rng);
        let mean = |pts: &[[f64; 2]]| {
            let n = pts.len() as f64;
            [pts.iter().map(|p| p[0]).sum::<f64>() / n, pts.iter().map(|p| p[1]).sum::<f64>() / n]
        };
        let m0 = mean(&data.class_points(0));
        let m1 = mean(&data.class_points(1));
        assert!((m0[0] + 0.25).abs() < 0.1 && m0[1].abs() < 0.1, "{m0:?}");
        // Class 1 splits roughly evenly between (1, -0.75) and (1, 1).
        assert!((m1[0] - 1.0).abs() < 0.1, "{m1:?}");
        assert!((m1[1] - 0.125).abs() < 0.15, "{m1:?}");
    }

    #[test]
    fn split_is_clamped_for_tiny_classes() {
        let mixture = TwoClassMixture { split_std_dev: 1_000.0, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..20 {
            let data = mixture.generate(3, &mut rng);
            assert_eq!(data.len(), 6);
        }
    }
}
