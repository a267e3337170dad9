use crate::math::matrix::Matrix;

/// Labelled 2-D points: `inputs` is `rows x 2`, `targets` is a one-hot
/// `rows x classes` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub inputs: Matrix,
    pub targets: Matrix,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.inputs.rows
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.rows == 0
    }

    /// Column `class` of the one-hot targets as a `rows x 1` matrix; the
    /// binary target for "is this point in `class`".
    pub fn target_column(&self, class: usize) -> Matrix {
        self.targets.column(class)
    }

    /// Input points whose one-hot target is set for `class`.
    pub fn class_points(&self, class: usize) -> Vec<[f64; 2]> {
        (0..self.len())
            .filter(|&i| self.targets[(i, class)] == 1.0)
            .map(|i| [self.inputs[(i, 0)], self.inputs[(i, 1)]])
            .collect()
    }
}
