use ndarray::{ArrayView1, ArrayView2};

use super::{Estimate, LocationEstimator};
use crate::{dataset::Dataset, loss::LossFn};

/// Scratch buffers of the derivative estimates, sized once per solve and reused by every
/// iteration.
#[derive(Debug, Clone)]
pub struct EstimatorState {
    deriv_samples: Vec<f64>,
    deriv_samples_outer_prods: Vec<f64>,
    gradient: Vec<f64>,
    stalled: usize,
}

impl EstimatorState {
    /// Creates a new `EstimatorState`.
    ///
    /// # Arguments
    /// * `n_samples` - The amount of training samples.
    /// * `n_weights` - The amount of weights, intercept included.
    pub fn new(n_samples: usize, n_weights: usize) -> Self {
        Self {
            deriv_samples: vec![0.0; n_samples],
            deriv_samples_outer_prods: vec![0.0; n_samples],
            gradient: vec![0.0; n_weights],
            stalled: 0,
        }
    }

    /// The amount of estimates that stopped at their iteration cap since this state was
    /// created.
    pub fn stalled(&self) -> usize {
        self.stalled
    }
}

fn unwrap_estimate(estimate: Estimate, stalled: &mut usize) -> f64 {
    if !estimate.converged {
        *stalled += 1;
    }

    estimate.value
}

/// Estimates the partial derivatives of the empirical risk of a linear model, aggregating the
/// per-sample derivatives with a `LocationEstimator` instead of a plain average.
///
/// When an intercept is modeled it is coordinate 0 and feature `f` is coordinate `f + 1`.
pub struct Derivatives<'a, L, E> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, f64>,
    loss: &'a L,
    estimator: &'a E,
    fit_intercept: bool,
}

impl<'a, L, E> Derivatives<'a, L, E>
where
    L: LossFn,
    E: LocationEstimator,
{
    /// Creates a new `Derivatives` provider.
    ///
    /// # Arguments
    /// * `dataset` - The training set.
    /// * `loss` - The per-sample loss.
    /// * `estimator` - The aggregator of per-sample derivatives.
    /// * `fit_intercept` - Whether coordinate 0 is an intercept.
    pub fn new(dataset: &'a Dataset, loss: &'a L, estimator: &'a E, fit_intercept: bool) -> Self {
        Self {
            x: dataset.x(),
            y: dataset.y(),
            loss,
            estimator,
            fit_intercept,
        }
    }

    pub fn n_weights(&self) -> usize {
        self.x.ncols() + self.fit_intercept as usize
    }

    /// Maps a coordinate to its feature column, `None` being the intercept.
    pub fn feature(&self, j: usize) -> Option<usize> {
        match (self.fit_intercept, j) {
            (true, 0) => None,
            (true, j) => Some(j - 1),
            (false, j) => Some(j),
        }
    }

    /// Estimates the partial derivative of coordinate `j`.
    ///
    /// # Arguments
    /// * `j` - The coordinate.
    /// * `inner_products` - The current linear predictor of every sample.
    /// * `state` - The scratch buffers.
    pub fn partial_derivative(
        &self,
        j: usize,
        inner_products: &[f64],
        state: &mut EstimatorState,
    ) -> f64 {
        let EstimatorState {
            deriv_samples,
            stalled,
            ..
        } = state;

        let samples = deriv_samples.iter_mut().zip(self.y).zip(inner_products);

        match self.feature(j) {
            None => {
                for ((d, &yi), &zi) in samples {
                    *d = self.loss.deriv(yi, zi);
                }
            }
            Some(f) => {
                for (((d, &yi), &zi), &xij) in samples.zip(self.x.column(f)) {
                    *d = self.loss.deriv(yi, zi) * xij;
                }
            }
        }

        unwrap_estimate(self.estimator.estimate(deriv_samples), stalled)
    }

    /// Estimates every partial derivative at once, reusing the per-sample derivatives across
    /// the feature columns.
    ///
    /// # Arguments
    /// * `inner_products` - The current linear predictor of every sample.
    /// * `state` - The scratch buffers, its `gradient` receives the result.
    ///
    /// # Returns
    /// The estimated gradient.
    pub fn gradient<'s>(&self, inner_products: &[f64], state: &'s mut EstimatorState) -> &'s [f64] {
        let EstimatorState {
            deriv_samples,
            deriv_samples_outer_prods,
            gradient,
            stalled,
        } = state;

        for ((d, &yi), &zi) in deriv_samples.iter_mut().zip(self.y).zip(inner_products) {
            *d = self.loss.deriv(yi, zi);
        }

        let offset = self.fit_intercept as usize;

        if self.fit_intercept {
            gradient[0] = unwrap_estimate(self.estimator.estimate(deriv_samples), stalled);
        }

        for (f, column) in self.x.columns().into_iter().enumerate() {
            for ((p, &d), &xij) in deriv_samples_outer_prods
                .iter_mut()
                .zip(deriv_samples.iter())
                .zip(column)
            {
                *p = d * xij;
            }

            let estimate = self.estimator.estimate(deriv_samples_outer_prods);
            gradient[f + offset] = unwrap_estimate(estimate, stalled);
        }

        gradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        estimation::{CatoniHolland, Mean},
        loss::LeastSquares,
    };
    use approx::assert_abs_diff_eq;

    fn dataset() -> Dataset {
        let rows = [1., 2., -1., 0.5, 3., -2., 0., 1.];
        let y = [1., -1., 2., 0.];
        Dataset::from_rows(&rows, 2, &y).unwrap()
    }

    #[test]
    fn with_the_mean_it_is_the_erm_gradient() {
        let dataset = dataset();
        let derivatives = Derivatives::new(&dataset, &LeastSquares, &Mean, true);
        let mut state = EstimatorState::new(4, 3);

        let z = [0.5, 0., 1., -1.];
        // residuals z - y
        let r = [-0.5, 1., -1., -1.];
        let expected = [
            r.iter().sum::<f64>() / 4.,
            (r[0] * 1. + r[1] * -1. + r[2] * 3. + r[3] * 0.) / 4.,
            (r[0] * 2. + r[1] * 0.5 + r[2] * -2. + r[3] * 1.) / 4.,
        ];

        for (j, &g) in expected.iter().enumerate() {
            assert_abs_diff_eq!(
                derivatives.partial_derivative(j, &z, &mut state),
                g,
                epsilon = 1e-12
            );
        }

        let gradient = derivatives.gradient(&z, &mut state);
        for (&got, &g) in gradient.iter().zip(&expected) {
            assert_abs_diff_eq!(got, g, epsilon = 1e-12);
        }
    }

    #[test]
    fn gradient_agrees_with_partial_derivatives() {
        let dataset = dataset();
        let estimator = CatoniHolland::default();
        let derivatives = Derivatives::new(&dataset, &LeastSquares, &estimator, false);
        let mut state = EstimatorState::new(4, 2);
        let z = [0.3, -0.7, 2.5, 1.1];

        let partials: Vec<f64> = (0..2)
            .map(|j| derivatives.partial_derivative(j, &z, &mut state))
            .collect();
        let gradient = derivatives.gradient(&z, &mut state);

        assert_eq!(gradient, partials.as_slice());
        assert_eq!(state.stalled(), 0);
    }

    #[test]
    fn coordinates_map_to_features() {
        let dataset = dataset();

        let with = Derivatives::new(&dataset, &LeastSquares, &Mean, true);
        assert_eq!(with.n_weights(), 3);
        assert_eq!(with.feature(0), None);
        assert_eq!(with.feature(2), Some(1));

        let without = Derivatives::new(&dataset, &LeastSquares, &Mean, false);
        assert_eq!(without.n_weights(), 2);
        assert_eq!(without.feature(0), Some(0));
    }
}
