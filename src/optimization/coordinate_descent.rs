use ndarray::ArrayView2;
use rand::{RngCore, seq::SliceRandom};

use super::{CycleStats, Problem, Solver, UpdateCycle, coordinate_steps};
use crate::{
    estimation::{Derivatives, EstimatorState, LocationEstimator},
    loss::LossFn,
    penalty::Penalty,
};

/// Proximal coordinate gradient descent.
///
/// Every pass visits the coordinates in a fresh random order, taking one proximal step per
/// coordinate and updating the inner products incrementally.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateSolver;

impl CoordinateSolver {
    /// Creates a new `CoordinateSolver`, its step sizes are derived from the problem.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for CoordinateSolver {
    fn name(&self) -> &'static str {
        "cgd"
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
        let x = problem.dataset().x();
        let steps = coordinate_steps(problem.loss().lip(), x, problem.fit_intercept());

        Box::new(CoordinateCycle::new(
            problem.derivatives(),
            x,
            problem.penalty(),
            steps,
        ))
    }
}

/// One pass of coordinate descent over a `Problem`.
pub struct CoordinateCycle<'p, L, E, P> {
    derivatives: Derivatives<'p, L, E>,
    x: ArrayView2<'p, f64>,
    penalty: &'p P,
    steps: Vec<f64>,
    scaled_steps: Vec<f64>,
    coordinates: Vec<usize>,
}

impl<'p, L, E, P> CoordinateCycle<'p, L, E, P>
where
    L: LossFn,
    E: LocationEstimator,
    P: Penalty,
{
    /// Creates a new `CoordinateCycle`.
    ///
    /// # Arguments
    /// * `derivatives` - The partial derivative provider.
    /// * `x` - The feature matrix, used for the incremental inner product updates.
    /// * `penalty` - The regularizer.
    /// * `steps` - One step size per coordinate.
    pub fn new(
        derivatives: Derivatives<'p, L, E>,
        x: ArrayView2<'p, f64>,
        penalty: &'p P,
        steps: Vec<f64>,
    ) -> Self {
        let strength = penalty.strength();
        let scaled_steps = steps.iter().map(|step| step * strength).collect();
        let coordinates = (0..derivatives.n_weights()).collect();

        Self {
            derivatives,
            x,
            penalty,
            steps,
            scaled_steps,
            coordinates,
        }
    }
}

impl<L, E, P> UpdateCycle for CoordinateCycle<'_, L, E, P>
where
    L: LossFn,
    E: LocationEstimator,
    P: Penalty,
{
    fn cycle(
        &mut self,
        weights: &mut [f64],
        inner_products: &mut [f64],
        state: &mut EstimatorState,
        rng: &mut dyn RngCore,
    ) -> CycleStats {
        let mut stats = CycleStats::default();
        self.coordinates.shuffle(rng);

        for &j in &self.coordinates {
            let grad_j = self.derivatives.partial_derivative(j, inner_products, state);
            let feature = self.derivatives.feature(j);

            let mut w_new = weights[j] - self.steps[j] * grad_j;
            if feature.is_some() {
                w_new = self.penalty.apply_one_unscaled(w_new, self.scaled_steps[j]);
            }

            let delta = w_new - weights[j];
            stats.observe(delta, w_new);
            weights[j] = w_new;

            if delta == 0.0 {
                continue;
            }

            match feature {
                None => inner_products.iter_mut().for_each(|z| *z += delta),
                Some(f) => {
                    for (z, &xij) in inner_products.iter_mut().zip(self.x.column(f)) {
                        *z += delta * xij;
                    }
                }
            }
        }

        stats
    }
}
