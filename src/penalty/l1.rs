use super::{Penalty, soft_threshold};

/// Lasso regularization, `strength · Σ|w_j|`.
#[derive(Debug, Clone, Copy)]
pub struct L1 {
    strength: f64,
}

impl L1 {
    /// Returns a new `L1` penalty.
    ///
    /// # Arguments
    /// * `strength` - The regularization strength.
    pub fn new(strength: f64) -> Self {
        Self { strength }
    }
}

impl Penalty for L1 {
    fn strength(&self) -> f64 {
        self.strength
    }

    fn apply_one_unscaled(&self, x: f64, step: f64) -> f64 {
        soft_threshold(x, step)
    }

    fn value_one(&self, w: f64) -> f64 {
        w.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prox_snaps_small_values_to_zero() {
        let l1 = L1::new(1.);

        assert_eq!(l1.apply_one_unscaled(0.3, 0.5), 0.0);
        assert_eq!(l1.apply_one_unscaled(-0.5, 0.5), 0.0);
        assert_eq!(l1.apply_one_unscaled(2.0, 0.5), 1.5);
        assert_eq!(l1.apply_one_unscaled(-2.0, 0.5), -1.5);
    }

    #[test]
    fn value_is_scaled_by_strength() {
        assert_eq!(L1::new(0.5).value(&[1., -2., 3.]), 3.);
    }
}
