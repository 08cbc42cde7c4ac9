use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{FitErr, OptimizationResult, Result, dataset::split_intercept};

/// A fitted linear model.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Vec<f64>,
    fit_intercept: bool,
}

impl LinearModel {
    /// Creates a new `LinearModel`.
    ///
    /// # Arguments
    /// * `weights` - The weights, intercept first when `fit_intercept` is set.
    /// * `fit_intercept` - Whether `weights` carries an intercept.
    pub fn new(weights: Vec<f64>, fit_intercept: bool) -> Self {
        Self {
            weights,
            fit_intercept,
        }
    }

    /// Creates a new `LinearModel` from the outcome of a solve.
    pub fn from_result(result: OptimizationResult, fit_intercept: bool) -> Self {
        Self::new(result.into_weights(), fit_intercept)
    }

    pub fn intercept(&self) -> f64 {
        split_intercept(&self.weights, self.fit_intercept).0
    }

    pub fn coefs(&self) -> &[f64] {
        split_intercept(&self.weights, self.fit_intercept).1
    }

    /// The linear predictor of every row of `x`.
    ///
    /// # Arguments
    /// * `x` - The samples, one per row.
    ///
    /// # Returns
    /// The predictor or an error if the amount of columns doesn't match the model.
    pub fn decision_function(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        let coefs = self.coefs();

        if x.ncols() != coefs.len() {
            return Err(FitErr::SizeMismatch {
                what: "prediction features",
                got: x.ncols(),
                expected: coefs.len(),
            });
        }

        Ok(x.dot(&ArrayView1::from(coefs)) + self.intercept())
    }

    /// Predicts labels in `{-1, 1}`.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        let z = self.decision_function(x)?;
        Ok(z.mapv(|z| if z > 0.0 { 1.0 } else { -1.0 }))
    }

    /// Predicts the probability of label `1` through the logistic link.
    pub fn predict_proba(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        let z = self.decision_function(x)?;
        Ok(z.mapv(sigmoid))
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn predictions_with_an_intercept() {
        let model = LinearModel::new(vec![-1., 2., 0.5], true);
        let x = array![[1., 0.], [0., 0.], [0., 4.]];

        assert_eq!(model.intercept(), -1.);
        assert_eq!(model.coefs(), [2., 0.5]);
        assert_eq!(model.decision_function(x.view()).unwrap(), array![1., -1., 1.]);
        assert_eq!(model.predict(x.view()).unwrap(), array![1., -1., 1.]);

        let proba = model.predict_proba(x.view()).unwrap();
        assert_abs_diff_eq!(proba[0], 1. / (1. + (-1f64).exp()), epsilon = 1e-15);
        assert_abs_diff_eq!(proba[0] + proba[1], 1., epsilon = 1e-15);
    }

    #[test]
    fn extreme_predictors_saturate() {
        let model = LinearModel::new(vec![1.], false);
        let proba = model.predict_proba(array![[1e4], [-1e4]].view()).unwrap();

        assert_eq!(proba[0], 1.);
        assert_eq!(proba[1], 0.);
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let model = LinearModel::new(vec![0., 1., 1.], true);
        let err = model.predict(array![[1., 2., 3.]].view()).unwrap_err();

        assert_eq!(
            err,
            FitErr::SizeMismatch {
                what: "prediction features",
                got: 3,
                expected: 2
            }
        );
    }
}
