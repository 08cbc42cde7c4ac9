use super::{Penalty, soft_threshold};

/// A convex combination of the `L1` and `L2Sq` penalties.
#[derive(Debug, Clone, Copy)]
pub struct ElasticNet {
    strength: f64,
    l1_ratio: f64,
}

impl ElasticNet {
    /// Returns a new `ElasticNet` penalty.
    ///
    /// # Arguments
    /// * `strength` - The regularization strength.
    /// * `l1_ratio` - The weight of the `L1` part, in `[0, 1]`.
    pub fn new(strength: f64, l1_ratio: f64) -> Self {
        Self { strength, l1_ratio }
    }
}

impl Penalty for ElasticNet {
    fn strength(&self) -> f64 {
        self.strength
    }

    fn apply_one_unscaled(&self, x: f64, step: f64) -> f64 {
        let shrunk = soft_threshold(x, self.l1_ratio * step);
        shrunk / (1.0 + (1.0 - self.l1_ratio) * step)
    }

    fn value_one(&self, w: f64) -> f64 {
        self.l1_ratio * w.abs() + 0.5 * (1.0 - self.l1_ratio) * w * w
    }
}
