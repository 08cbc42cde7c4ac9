use log::warn;

use super::{EstimatorSpec, Fit, FitSpec, LossSpec, PenaltySpec, SolverLoop, SolverSpec};
use crate::{
    Dataset, FitErr, Result,
    estimation::{
        CatoniHolland, LocationEstimator, Mean, MedianOfMeans, StandardCatoni, TrimmedMean,
    },
    loss::{LeastSquares, LossFn, Logistic},
    optimization::{CoordinateSolver, FullBatchSolver, Problem, Solver},
    penalty::{ElasticNet, L1, L2Sq, NoPenalty, Penalty},
};

/// Builds solvers given a specification.
#[derive(Debug, Default)]
pub struct SolverBuilder;

impl SolverBuilder {
    /// Creates a new `SolverBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new solver following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification of the fit.
    /// * `dataset` - The training set.
    ///
    /// # Returns
    /// The solver, or an error if the spec holds an out of range hyperparameter.
    pub fn build<'a>(&self, spec: &FitSpec, dataset: &'a Dataset) -> Result<Box<dyn Fit + 'a>> {
        self.validate(spec, dataset)?;
        Ok(self.resolve_loss(spec, dataset))
    }

    fn validate(&self, spec: &FitSpec, dataset: &Dataset) -> Result<()> {
        let invalid = |what, reason: &str| {
            Err(FitErr::InvalidSpec {
                what,
                reason: reason.to_string(),
            })
        };

        if dataset.n_samples() == 0 {
            return invalid("dataset", "it holds no samples");
        }

        if !(spec.c > 0.0 && spec.c.is_finite()) {
            return invalid("c", &format!("{} is not a positive number", spec.c));
        }

        if !(spec.tol > 0.0 && spec.tol.is_finite()) {
            return invalid("tol", &format!("{} is not a positive number", spec.tol));
        }

        match spec.estimator {
            EstimatorSpec::Ch { eps } | EstimatorSpec::Catoni { eps }
                if !(eps > 0.0 && eps < 1.0) =>
            {
                return invalid("eps", &format!("{eps} is not in (0, 1)"));
            }
            EstimatorSpec::Mom { block_size } if !(block_size > 0.0 && block_size <= 1.0) => {
                return invalid("block_size", &format!("{block_size} is not in (0, 1]"));
            }
            EstimatorSpec::Tmean { percentage } if !(percentage > 0.0 && percentage <= 1.0) => {
                return invalid("percentage", &format!("{percentage} is not in (0, 1]"));
            }
            _ => {}
        }

        match spec.penalty {
            PenaltySpec::ElasticNet { l1_ratio } if !(0.0..=1.0).contains(&l1_ratio) => {
                invalid("l1_ratio", &format!("{l1_ratio} is not in [0, 1]"))
            }
            _ => Ok(()),
        }
    }

    fn resolve_loss<'a>(&self, spec: &FitSpec, dataset: &'a Dataset) -> Box<dyn Fit + 'a> {
        match spec.loss {
            LossSpec::Logistic => self.resolve_estimator(spec, dataset, Logistic::new()),
            LossSpec::LeastSquares => self.resolve_estimator(spec, dataset, LeastSquares::new()),
        }
    }

    fn resolve_estimator<'a, L>(
        &self,
        spec: &FitSpec,
        dataset: &'a Dataset,
        loss: L,
    ) -> Box<dyn Fit + 'a>
    where
        L: LossFn + 'a,
    {
        match spec.estimator {
            EstimatorSpec::Erm => self.resolve_penalty(spec, dataset, loss, Mean),
            EstimatorSpec::Ch { eps } => {
                self.resolve_penalty(spec, dataset, loss, CatoniHolland::new(eps))
            }
            EstimatorSpec::Catoni { eps } => {
                self.resolve_penalty(spec, dataset, loss, StandardCatoni::new(eps))
            }
            EstimatorSpec::Mom { block_size } if block_size == 1.0 => {
                warn!("block_size=1 makes a single block, using the plain mean instead");
                self.resolve_penalty(spec, dataset, loss, Mean)
            }
            EstimatorSpec::Mom { block_size } => {
                let n_samples_block = (dataset.n_samples() as f64 * block_size) as usize;
                let estimator = MedianOfMeans::new(n_samples_block);
                self.resolve_penalty(spec, dataset, loss, estimator)
            }
            EstimatorSpec::Tmean { percentage } => {
                self.resolve_penalty(spec, dataset, loss, TrimmedMean::new(percentage))
            }
        }
    }

    fn resolve_penalty<'a, L, E>(
        &self,
        spec: &FitSpec,
        dataset: &'a Dataset,
        loss: L,
        estimator: E,
    ) -> Box<dyn Fit + 'a>
    where
        L: LossFn + 'a,
        E: LocationEstimator + 'a,
    {
        let strength = 1.0 / (spec.c * dataset.n_samples() as f64);

        match spec.penalty {
            PenaltySpec::None => {
                let penalty = NoPenalty::new(strength);
                self.resolve_solver(spec, dataset, loss, estimator, penalty)
            }
            PenaltySpec::L1 => {
                let penalty = L1::new(strength);
                self.resolve_solver(spec, dataset, loss, estimator, penalty)
            }
            PenaltySpec::L2 => {
                let penalty = L2Sq::new(strength);
                self.resolve_solver(spec, dataset, loss, estimator, penalty)
            }
            PenaltySpec::ElasticNet { l1_ratio } => {
                let penalty = ElasticNet::new(strength, l1_ratio);
                self.resolve_solver(spec, dataset, loss, estimator, penalty)
            }
        }
    }

    fn resolve_solver<'a, L, E, P>(
        &self,
        spec: &FitSpec,
        dataset: &'a Dataset,
        loss: L,
        estimator: E,
        penalty: P,
    ) -> Box<dyn Fit + 'a>
    where
        L: LossFn + 'a,
        E: LocationEstimator + 'a,
        P: Penalty + 'a,
    {
        let problem = Problem::new(dataset, loss, estimator, penalty, spec.fit_intercept);

        match spec.solver {
            SolverSpec::Cgd => self.terminate_build(spec, problem, CoordinateSolver::new()),
            SolverSpec::Gd => self.terminate_build(spec, problem, FullBatchSolver::new()),
        }
    }

    fn terminate_build<'a, L, E, P, S>(
        &self,
        spec: &FitSpec,
        problem: Problem<'a, L, E, P>,
        solver: S,
    ) -> Box<dyn Fit + 'a>
    where
        L: LossFn + 'a,
        E: LocationEstimator + 'a,
        P: Penalty + 'a,
        S: Solver + 'a,
    {
        let solver = SolverLoop::new(problem, solver, spec.tol, spec.max_iter, spec.seed);
        Box::new(solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_rows(&[0., 1., 2., 3.], 1, &[-1., -1., 1., 1.]).unwrap()
    }

    fn invalid_field(spec: &FitSpec) -> &'static str {
        match SolverBuilder::new().build(spec, &dataset()) {
            Err(FitErr::InvalidSpec { what, .. }) => what,
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("the spec should have been rejected"),
        }
    }

    #[test]
    fn out_of_range_hyperparameters_are_rejected() {
        let base = FitSpec::default();

        let spec = FitSpec { c: 0.0, ..base.clone() };
        assert_eq!(invalid_field(&spec), "c");

        let spec = FitSpec { tol: -1e-4, ..base.clone() };
        assert_eq!(invalid_field(&spec), "tol");

        let spec = FitSpec {
            estimator: EstimatorSpec::Ch { eps: 1.0 },
            ..base.clone()
        };
        assert_eq!(invalid_field(&spec), "eps");

        let spec = FitSpec {
            estimator: EstimatorSpec::Catoni { eps: 0.0 },
            ..base.clone()
        };
        assert_eq!(invalid_field(&spec), "eps");

        let spec = FitSpec {
            estimator: EstimatorSpec::Mom { block_size: 1.2 },
            ..base.clone()
        };
        assert_eq!(invalid_field(&spec), "block_size");

        let spec = FitSpec {
            estimator: EstimatorSpec::Tmean { percentage: 0.0 },
            ..base.clone()
        };
        assert_eq!(invalid_field(&spec), "percentage");

        let spec = FitSpec {
            penalty: PenaltySpec::ElasticNet { l1_ratio: 1.5 },
            ..base
        };
        assert_eq!(invalid_field(&spec), "l1_ratio");
    }

    #[test]
    fn every_combination_builds() {
        let dataset = dataset();
        let losses = [LossSpec::Logistic, LossSpec::LeastSquares];
        let estimators = [
            EstimatorSpec::Erm,
            EstimatorSpec::Ch { eps: 0.01 },
            EstimatorSpec::Catoni { eps: 0.01 },
            EstimatorSpec::Mom { block_size: 0.5 },
            EstimatorSpec::Mom { block_size: 1.0 },
            EstimatorSpec::Tmean { percentage: 0.5 },
        ];
        let penalties = [
            PenaltySpec::None,
            PenaltySpec::L1,
            PenaltySpec::L2,
            PenaltySpec::ElasticNet { l1_ratio: 0.3 },
        ];

        for loss in losses {
            for estimator in estimators {
                for penalty in penalties {
                    for solver in [SolverSpec::Cgd, SolverSpec::Gd] {
                        let spec = FitSpec {
                            loss,
                            estimator,
                            penalty,
                            solver,
                            seed: Some(0),
                            ..FitSpec::default()
                        };

                        let mut fit = SolverBuilder::new().build(&spec, &dataset).unwrap();
                        let result = fit.solve(None).unwrap();

                        assert_eq!(result.weights().len(), 2);
                        assert!(result.weights().iter().all(|w| w.is_finite()));
                        assert_eq!(fit.history().len(), result.n_iter() + 1);
                    }
                }
            }
        }
    }

    #[test]
    fn a_single_block_falls_back_to_the_plain_mean() {
        let dataset = dataset();
        let solve = |estimator| {
            let spec = FitSpec {
                estimator,
                seed: Some(5),
                ..FitSpec::default()
            };
            SolverBuilder::new()
                .build(&spec, &dataset)
                .unwrap()
                .solve(None)
                .unwrap()
        };

        assert_eq!(
            solve(EstimatorSpec::Mom { block_size: 1.0 }),
            solve(EstimatorSpec::Erm)
        );
    }
}
