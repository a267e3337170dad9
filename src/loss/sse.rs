pub struct SseLoss;

impl SseLoss {
    /// Squared error against an all-zero target, i.e. `|v|²`.
    pub fn against_zero(values: &[f64]) -> f64 {
        values.iter().map(|v| v * v).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_rather_than_averages() {
        assert_eq!(SseLoss::against_zero(&[3.0, -4.0]), 25.0);
        assert_eq!(SseLoss::against_zero(&[]), 0.0);
    }
}
