use crate::math::gaussian::Gaussian2;

/// Closed-form score whose zero level is the ideal decision boundary:
/// class 0 enters with weight −5, the two class-1 components with +5.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDensity {
    pub components: Vec<(f64, Gaussian2)>,
}

impl Default for ReferenceDensity {
    fn default() -> Self {
        ReferenceDensity {
            components: vec![
                (-5.0, Gaussian2::new([-0.25, 0.0], [[1.0, 1.0], [0.0, 1.0]])),
                (5.0, Gaussian2::new([1.0, -0.75], [[1.0, 0.8], [0.8, 1.0]])),
                (5.0, Gaussian2::new([0.75, 1.0], [[1.0, 1.0], [0.0, 1.0]])),
            ],
        }
    }
}

impl ReferenceDensity {
    pub fn value(&self, x: f64, y: f64) -> f64 {
        self.components.iter().map(|(w, g)| w * g.kernel([x, y])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_follows_the_dominant_class() {
        let r = ReferenceDensity::default();
        assert!(r.value(-0.25, 0.0) < 0.0);
        assert!(r.value(1.0, -0.75) > 0.0);
        assert!(r.value(0.75, 1.0) > 0.0);
    }
}
