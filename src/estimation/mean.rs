use super::{Estimate, LocationEstimator};

/// The arithmetic mean, i.e. plain empirical risk minimization.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mean;

impl LocationEstimator for Mean {
    fn estimate(&self, x: &[f64]) -> Estimate {
        Estimate::exact(x.iter().sum::<f64>() / x.len() as f64)
    }
}
