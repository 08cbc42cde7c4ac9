/// The outcome of a location estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// The estimated central value.
    pub value: f64,
    /// Whether the underlying iterations met their tolerance before their safety cap.
    pub converged: bool,
}

impl Estimate {
    /// An estimate that needed no iterations at all.
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            converged: true,
        }
    }
}

/// Aggregates a finite sample of real numbers into a single central value.
///
/// This is what replaces the plain average of per-sample derivatives when estimating a
/// gradient coordinate.
pub trait LocationEstimator {
    /// Estimates the location of `x`.
    ///
    /// # Arguments
    /// * `x` - A non-empty sample.
    fn estimate(&self, x: &[f64]) -> Estimate;
}
