use std::cell::RefCell;

use super::{Estimate, LocationEstimator};

/// The trimmed mean: the average left once the `percentage · n / 2` smallest and largest values
/// are discarded.
///
/// At least one value is always kept.
#[derive(Debug, Clone)]
pub struct TrimmedMean {
    percentage: f64,
    sorted: RefCell<Vec<f64>>,
}

impl TrimmedMean {
    /// Creates a new `TrimmedMean` estimator.
    ///
    /// # Arguments
    /// * `percentage` - The share of values discarded, split evenly between both tails, in
    ///   `(0, 1]`.
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage,
            sorted: RefCell::new(Vec::new()),
        }
    }
}

impl LocationEstimator for TrimmedMean {
    fn estimate(&self, x: &[f64]) -> Estimate {
        let n = x.len();
        let excluded = ((n as f64 * self.percentage / 2.0) as usize).min(n.saturating_sub(1) / 2);

        let mut sorted = self.sorted.borrow_mut();
        sorted.clear();
        sorted.extend_from_slice(x);
        sorted.sort_unstable_by(f64::total_cmp);

        let kept = &sorted[excluded..n - excluded];
        Estimate::exact(kept.iter().sum::<f64>() / kept.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_tails_are_discarded() {
        let x = [100., 1., 2., 3., -50., 4., 5., 6., 7., 8.];

        // 20% of 10 values: one from each tail
        assert_eq!(TrimmedMean::new(0.2).estimate(&x).value, 4.5);
        // less than one value per tail keeps everything
        assert_eq!(TrimmedMean::new(0.1).estimate(&x).value, 8.6);
    }

    #[test]
    fn full_trimming_keeps_the_middle() {
        assert_eq!(TrimmedMean::new(1.0).estimate(&[5., 1., 3.]).value, 3.);
        assert_eq!(TrimmedMean::new(1.0).estimate(&[4., 1., 2., 3.]).value, 2.5);
    }

    #[test]
    fn one_sided_outliers_are_discarded() {
        let mut x: Vec<f64> = (0..1000).map(|i| ((i * 37) % 101) as f64 / 50.0 - 1.0).collect();
        let inlier_mean = x[50..].iter().sum::<f64>() / 950.0;
        x[..50].fill(1000.0);

        let estimate = TrimmedMean::new(0.2).estimate(&x);

        assert!((estimate.value - inlier_mean).abs() < 0.3);
    }
}
