use std::num::NonZeroUsize;

use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use super::{History, OptimizationResult};
use crate::{
    FitErr, Result,
    estimation::{EstimatorState, LocationEstimator},
    loss::LossFn,
    optimization::{Problem, Solver},
    penalty::Penalty,
};

/// A configured solver, ready to fit its training set.
pub trait Fit {
    /// Runs the solver until convergence or until the iteration budget is exhausted.
    ///
    /// # Arguments
    /// * `w0` - Optional initial weights, zeros otherwise.
    ///
    /// # Returns
    /// The outcome of the solve. Not converging is reported in the result, not as an error.
    fn solve(&mut self, w0: Option<&[f64]>) -> Result<OptimizationResult>;

    /// The progress record of the last solve.
    fn history(&self) -> &History;
}

/// Repeats the update pass of a `Solver` on a `Problem`, tracking the objective and the
/// relative tolerance of every iteration.
pub struct SolverLoop<'a, L, E, P, S> {
    problem: Problem<'a, L, E, P>,
    solver: S,
    tol: f64,
    max_iter: NonZeroUsize,
    seed: Option<u64>,
    rng: StdRng,
    history: History,
}

impl<'a, L, E, P, S> SolverLoop<'a, L, E, P, S>
where
    L: LossFn,
    E: LocationEstimator,
    P: Penalty,
    S: Solver,
{
    /// Creates a new `SolverLoop`.
    ///
    /// # Arguments
    /// * `problem` - The objective to minimize.
    /// * `solver` - The optimization algorithm.
    /// * `tol` - The relative tolerance below which the loop stops.
    /// * `max_iter` - The iteration budget.
    /// * `seed` - Optional seed, applied at the start of every solve.
    pub fn new(
        problem: Problem<'a, L, E, P>,
        solver: S,
        tol: f64,
        max_iter: NonZeroUsize,
        seed: Option<u64>,
    ) -> Self {
        let history = History::new(Some(solver.name().to_string()), max_iter.get());

        Self {
            problem,
            solver,
            tol,
            max_iter,
            seed,
            rng: generate_rng(seed),
            history,
        }
    }

    fn initial_weights(&self, w0: Option<&[f64]>) -> Result<Vec<f64>> {
        let n_weights = self.problem.n_weights();

        match w0 {
            Some(w0) if w0.len() != n_weights => Err(FitErr::SizeMismatch {
                what: "initial weights",
                got: w0.len(),
                expected: n_weights,
            }),
            Some(w0) => Ok(w0.to_vec()),
            None => Ok(vec![0.0; n_weights]),
        }
    }
}

impl<L, E, P, S> Fit for SolverLoop<'_, L, E, P, S>
where
    L: LossFn,
    E: LocationEstimator,
    P: Penalty,
    S: Solver,
{
    fn solve(&mut self, w0: Option<&[f64]>) -> Result<OptimizationResult> {
        let mut weights = self.initial_weights(w0)?;

        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        let dataset = self.problem.dataset();
        let fit_intercept = self.problem.fit_intercept();
        let n_samples = dataset.n_samples();
        let n_weights = weights.len();
        let max_iter = self.max_iter.get();

        let mut inner_products = vec![0.0; n_samples];
        dataset.decision_function(&weights, fit_intercept, &mut inner_products);

        let mut state = EstimatorState::new(n_samples, n_weights);
        let mut cycle = self.solver.build_update_cycle(&self.problem);

        info!(
            solver = self.solver.name(),
            n_samples = n_samples,
            n_weights = n_weights,
            max_iter = max_iter;
            "starting solve"
        );

        self.history.clear();
        let objective = self.problem.objective(&weights, &inner_products);
        self.history
            .update(&[("epoch", 0.0), ("obj", objective), ("tol", 1.0)])?;

        let mut tol = 1.0;
        let mut n_iter = max_iter;
        let mut success = false;

        for epoch in 1..=max_iter {
            let stats = cycle.cycle(&mut weights, &mut inner_products, &mut state, &mut self.rng);
            let objective = self.problem.objective(&weights, &inner_products);
            tol = stats.tolerance();

            self.history
                .update(&[("epoch", epoch as f64), ("obj", objective), ("tol", tol)])?;
            debug!(epoch = epoch, objective = objective, tol = tol; "iteration done");

            if tol < self.tol {
                n_iter = epoch;
                success = true;
                break;
            }
        }

        let mut notes = Vec::new();

        if !success {
            warn!("reached max_iter={max_iter} without converging: tol={tol:.2e}");
            notes.push(format!("reached max_iter={max_iter} before tol < {:e}", self.tol));
        }

        let stalled = state.stalled();
        if stalled > 0 {
            warn!("{stalled} robust estimates stopped at their iteration cap");
            notes.push(format!("{stalled} robust estimates stopped at their iteration cap"));
        }

        info!(n_iter = n_iter, success = success, tol = tol; "solve finished");

        let message = (!notes.is_empty()).then(|| notes.join("; "));
        Ok(OptimizationResult::new(weights, n_iter, success, tol, message))
    }

    fn history(&self) -> &History {
        &self.history
    }
}

fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
