use super::LossFn;

/// Logistic loss for labels in `{-1, 1}`, `ln(1 + exp(-y·z))`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logistic;

impl Logistic {
    /// Returns a new `Logistic`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Logistic {
    fn value(&self, y: f64, z: f64) -> f64 {
        let t = y * z;

        if t > 0.0 {
            (-t).exp().ln_1p()
        } else {
            -t + t.exp().ln_1p()
        }
    }

    // -y·σ(-y·z), split on the sign of y·z so `exp` never overflows.
    fn deriv(&self, y: f64, z: f64) -> f64 {
        let t = y * z;

        if t > 0.0 {
            let e = (-t).exp();
            -y * e / (1.0 + e)
        } else {
            -y / (1.0 + t.exp())
        }
    }

    fn lip(&self) -> f64 {
        0.25
    }
}
