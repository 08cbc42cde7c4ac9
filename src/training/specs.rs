use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// The per-sample loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossSpec {
    /// Binary classification with labels in `{-1, 1}`.
    Logistic,
    LeastSquares,
}

/// The regularizer, its strength is derived from `FitSpec::c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltySpec {
    None,
    L1,
    L2,
    ElasticNet { l1_ratio: f64 },
}

/// How the per-sample derivatives are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorSpec {
    /// The plain average, empirical risk minimization.
    Erm,
    /// The Catoni-Holland fixed-point estimator.
    Ch { eps: f64 },
    /// Catoni's estimator solved by root finding.
    Catoni { eps: f64 },
    /// Median-of-means over blocks holding a `block_size` share of the samples, in `(0, 1]`.
    Mom { block_size: f64 },
    /// The mean once a `percentage` share of the samples is trimmed from the tails, in `(0, 1]`.
    Tmean { percentage: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverSpec {
    /// Proximal coordinate gradient descent.
    Cgd,
    /// Proximal full-batch gradient descent.
    Gd,
}

const DEFAULT_MAX_ITER: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

/// Everything needed to fit a linear model.
///
/// Missing fields take their default value when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitSpec {
    pub loss: LossSpec,
    pub penalty: PenaltySpec,
    /// Inverse regularization, the penalty strength is `1 / (c · n_samples)`.
    pub c: f64,
    pub estimator: EstimatorSpec,
    pub solver: SolverSpec,
    /// Whether weight 0 is an unpenalized intercept.
    pub fit_intercept: bool,
    /// The relative tolerance below which the solver stops.
    pub tol: f64,
    /// The iteration budget.
    pub max_iter: NonZeroUsize,
    /// Optional seed for the coordinate shuffling.
    pub seed: Option<u64>,
}

impl Default for FitSpec {
    fn default() -> Self {
        Self {
            loss: LossSpec::Logistic,
            penalty: PenaltySpec::L2,
            c: 1.0,
            estimator: EstimatorSpec::Ch { eps: 0.001 },
            solver: SolverSpec::Cgd,
            fit_intercept: true,
            tol: 1e-4,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }
}
