use super::{Problem, UpdateCycle};
use crate::{estimation::LocationEstimator, loss::LossFn, penalty::Penalty};

/// An optimization algorithm, described by the pass it repeats.
pub trait Solver {
    /// A short name used in logs and in the history's title.
    fn name(&self) -> &'static str;

    /// Builds the update pass of this algorithm for a given problem.
    ///
    /// # Arguments
    /// * `problem` - The problem to minimize.
    fn build_update_cycle<'p, L, E, P>(
        &self,
        problem: &'p Problem<'_, L, E, P>,
    ) -> Box<dyn UpdateCycle + 'p>
    where
        L: LossFn + 'p,
        E: LocationEstimator + 'p,
        P: Penalty + 'p;
}
