use crate::{
    dataset::{Dataset, split_intercept},
    estimation::{Derivatives, LocationEstimator},
    loss::LossFn,
    penalty::Penalty,
};

/// Everything that defines the objective being minimized: the training set, the loss, the
/// aggregator of per-sample derivatives and the regularizer.
pub struct Problem<'a, L, E, P> {
    dataset: &'a Dataset,
    loss: L,
    estimator: E,
    penalty: P,
    fit_intercept: bool,
}

impl<'a, L, E, P> Problem<'a, L, E, P>
where
    L: LossFn,
    E: LocationEstimator,
    P: Penalty,
{
    /// Creates a new `Problem`.
    ///
    /// # Arguments
    /// * `dataset` - The training set.
    /// * `loss` - The per-sample loss.
    /// * `estimator` - The aggregator of per-sample derivatives.
    /// * `penalty` - The regularizer, never applied to the intercept.
    /// * `fit_intercept` - Whether weight 0 is an intercept.
    pub fn new(dataset: &'a Dataset, loss: L, estimator: E, penalty: P, fit_intercept: bool) -> Self {
        Self {
            dataset,
            loss,
            estimator,
            penalty,
            fit_intercept,
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn loss(&self) -> &L {
        &self.loss
    }

    pub fn penalty(&self) -> &P {
        &self.penalty
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// The amount of weights, intercept included.
    pub fn n_weights(&self) -> usize {
        self.dataset.n_features() + self.fit_intercept as usize
    }

    /// Returns the derivative provider of this problem.
    pub fn derivatives(&self) -> Derivatives<'_, L, E> {
        Derivatives::new(
            self.dataset,
            &self.loss,
            &self.estimator,
            self.fit_intercept,
        )
    }

    /// The objective: the average loss plus the penalty of the non-intercept weights.
    ///
    /// # Arguments
    /// * `weights` - The current weights.
    /// * `inner_products` - The linear predictor of every sample for `weights`.
    pub fn objective(&self, weights: &[f64], inner_products: &[f64]) -> f64 {
        let (_, coefs) = split_intercept(weights, self.fit_intercept);
        self.loss.value_batch(self.dataset.y(), inner_products) + self.penalty.value(coefs)
    }
}
