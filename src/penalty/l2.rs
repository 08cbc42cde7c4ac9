use super::Penalty;

/// Ridge regularization, `strength · Σ½w_j²`.
#[derive(Debug, Clone, Copy)]
pub struct L2Sq {
    strength: f64,
}

impl L2Sq {
    /// Returns a new `L2Sq` penalty.
    ///
    /// # Arguments
    /// * `strength` - The regularization strength.
    pub fn new(strength: f64) -> Self {
        Self { strength }
    }
}

impl Penalty for L2Sq {
    fn strength(&self) -> f64 {
        self.strength
    }

    fn apply_one_unscaled(&self, x: f64, step: f64) -> f64 {
        x / (1.0 + step)
    }

    fn value_one(&self, w: f64) -> f64 {
        0.5 * w * w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prox_shrinks() {
        assert_eq!(L2Sq::new(1.).apply_one_unscaled(3., 0.5), 2.);
    }

    #[test]
    fn value() {
        assert_eq!(L2Sq::new(2.).value(&[1., -2.]), 5.);
    }
}
