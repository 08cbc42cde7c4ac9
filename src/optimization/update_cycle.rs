use rand::RngCore;

use crate::estimation::EstimatorState;

/// The bookkeeping of one pass over the weights, used by the convergence test.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CycleStats {
    /// The largest absolute change of a single weight.
    pub max_abs_delta: f64,
    /// The largest absolute value of an updated weight.
    pub max_abs_weight: f64,
}

impl CycleStats {
    /// Accounts for a weight update.
    ///
    /// # Arguments
    /// * `delta` - The change of the weight.
    /// * `new` - The updated weight.
    pub fn observe(&mut self, delta: f64, new: f64) {
        self.max_abs_delta = self.max_abs_delta.max(delta.abs());
        self.max_abs_weight = self.max_abs_weight.max(new.abs());
    }

    /// The relative tolerance `max_abs_delta / max_abs_weight`, `0` when every weight is zero.
    pub fn tolerance(&self) -> f64 {
        if self.max_abs_weight == 0.0 {
            0.0
        } else {
            self.max_abs_delta / self.max_abs_weight
        }
    }
}

/// One pass of an optimization algorithm over the weight vector.
pub trait UpdateCycle {
    /// Updates `weights` in place and leaves `inner_products` consistent with them.
    ///
    /// # Arguments
    /// * `weights` - The weights, intercept first when modeled.
    /// * `inner_products` - The linear predictor of every sample, consistent with `weights`.
    /// * `state` - The scratch buffers of the derivative estimates.
    /// * `rng` - The solver's random source.
    ///
    /// # Returns
    /// The statistics of the pass.
    fn cycle(
        &mut self,
        weights: &mut [f64],
        inner_products: &mut [f64],
        state: &mut EstimatorState,
        rng: &mut dyn RngCore,
    ) -> CycleStats;
}
