use rand::RngCore;

use super::{CycleStats, Problem, Solver, UpdateCycle, full_batch_step};
use crate::{
    dataset::Dataset,
    estimation::{Derivatives, EstimatorState, LocationEstimator},
    loss::LossFn,
    penalty::Penalty,
};

/// Proximal full-batch gradient descent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullBatchSolver {
    step: Option<f64>,
}

impl FullBatchSolver {
    /// Creates a new `FullBatchSolver` with a step size derived from the problem.
    pub fn new() -> Self {
        Self { step: None }
    }

    /// Overrides the step size.
    ///
    /// # Arguments
    /// * `step` - The *length* of the steps taken on every pass.
    pub fn with_step(step: f64) -> Self {
        Self { step: Some(step) }
    }
}

impl Solver for FullBatchSolver {
    fn name(&self) -> &'static str {
        "gd"
    }

    fn build_update_cycle<'p, L, E, P>(
        &self,
        problem: &'p Problem<'_, L, E, P>,
    ) -> Box<dyn UpdateCycle + 'p>
    where
        L: LossFn + 'p,
        E: LocationEstimator + 'p,
        P: Penalty + 'p,
    {
        let dataset = problem.dataset();
        let fit_intercept = problem.fit_intercept();
        let step = self.step.unwrap_or_else(|| {
            full_batch_step(problem.loss().lip(), dataset.x(), fit_intercept)
        });

        Box::new(GradientCycle {
            derivatives: problem.derivatives(),
            dataset,
            fit_intercept,
            penalty: problem.penalty(),
            step,
            scaled_step: step * problem.penalty().strength(),
            w_new: vec![0.0; problem.n_weights()],
        })
    }
}

/// One pass of gradient descent over a `Problem`.
pub struct GradientCycle<'p, L, E, P> {
    derivatives: Derivatives<'p, L, E>,
    dataset: &'p Dataset,
    fit_intercept: bool,
    penalty: &'p P,
    step: f64,
    scaled_step: f64,
    w_new: Vec<f64>,
}

impl<L, E, P> UpdateCycle for GradientCycle<'_, L, E, P>
where
    L: LossFn,
    E: LocationEstimator,
    P: Penalty,
{
    /// Takes a step in the opposite direction of the estimated gradient, followed by the
    /// proximal operator of the penalty, and recomputes every inner product from scratch.
    fn cycle(
        &mut self,
        weights: &mut [f64],
        inner_products: &mut [f64],
        state: &mut EstimatorState,
        _rng: &mut dyn RngCore,
    ) -> CycleStats {
        let mut stats = CycleStats::default();
        let gradient = self.derivatives.gradient(inner_products, state);

        for (j, ((w_new, &w), &g)) in self
            .w_new
            .iter_mut()
            .zip(weights.iter())
            .zip(gradient)
            .enumerate()
        {
            let mut candidate = w - self.step * g;
            if self.derivatives.feature(j).is_some() {
                candidate = self.penalty.apply_one_unscaled(candidate, self.scaled_step);
            }

            stats.observe(candidate - w, candidate);
            *w_new = candidate;
        }

        weights.copy_from_slice(&self.w_new);
        self.dataset
            .decision_function(weights, self.fit_intercept, inner_products);

        stats
    }
}
