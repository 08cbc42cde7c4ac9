use std::cell::RefCell;

use super::{Estimate, LocationEstimator};

/// Median-of-means: the median of the averages of consecutive blocks of `n_samples_block`
/// values.
///
/// Samples left over after the last full block are ignored, a sample shorter than one block is
/// averaged as a whole.
#[derive(Debug, Clone)]
pub struct MedianOfMeans {
    n_samples_block: usize,
    block_means: RefCell<Vec<f64>>,
}

impl MedianOfMeans {
    /// Creates a new `MedianOfMeans` estimator.
    ///
    /// # Arguments
    /// * `n_samples_block` - The amount of values per block, at least 1.
    pub fn new(n_samples_block: usize) -> Self {
        Self {
            n_samples_block: n_samples_block.max(1),
            block_means: RefCell::new(Vec::new()),
        }
    }

    pub fn n_samples_block(&self) -> usize {
        self.n_samples_block
    }
}

impl LocationEstimator for MedianOfMeans {
    fn estimate(&self, x: &[f64]) -> Estimate {
        if x.len() < self.n_samples_block {
            return Estimate::exact(mean(x));
        }

        let mut block_means = self.block_means.borrow_mut();
        block_means.clear();
        block_means.extend(x.chunks_exact(self.n_samples_block).map(mean));

        Estimate::exact(median(&mut block_means))
    }
}

fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

// The average of the two middle values for an even amount of values.
fn median(x: &mut [f64]) -> f64 {
    let n = x.len();
    let (lower, &mut upper, _) = x.select_nth_unstable_by(n / 2, f64::total_cmp);

    if n % 2 == 1 {
        return upper;
    }

    let below = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (below + upper) / 2.0
}
