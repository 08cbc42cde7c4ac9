use super::Penalty;

/// The absence of regularization.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPenalty {
    strength: f64,
}

impl NoPenalty {
    /// Returns a new `NoPenalty`, the strength is kept only for reporting.
    pub fn new(strength: f64) -> Self {
        Self { strength }
    }
}

impl Penalty for NoPenalty {
    fn strength(&self) -> f64 {
        self.strength
    }

    fn apply_one_unscaled(&self, x: f64, _step: f64) -> f64 {
        x
    }

    fn value_one(&self, _w: f64) -> f64 {
        0.0
    }
}
