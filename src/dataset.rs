use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, ShapeBuilder, linalg};

use crate::{FitErr, Result};

/// A dense training set: a feature matrix of shape `(n_samples, n_features)` and one target
/// per sample.
///
/// The features are kept in column-major order so that the coordinate-wise solver reads each
/// feature column contiguously.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one row per sample.
    /// * `y` - The targets, one per sample.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the amount of rows and targets differ.
    pub fn new(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(FitErr::SizeMismatch {
                what: "targets",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        let mut columns = Array2::zeros(x.raw_dim().f());
        columns.assign(&x);

        let dataset = Self {
            x: columns,
            y: y.to_owned(),
        };

        Ok(dataset)
    }

    /// Creates a new `Dataset` from a flat sample-major buffer.
    ///
    /// # Arguments
    /// * `rows` - The features, `n_features` consecutive values per sample.
    /// * `n_features` - The amount of features per sample.
    /// * `y` - The targets, one per sample.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the buffer does not hold exactly `y.len()` rows.
    pub fn from_rows(rows: &[f64], n_features: usize, y: &[f64]) -> Result<Self> {
        let mismatch = || FitErr::SizeMismatch {
            what: "features",
            got: rows.len(),
            expected: y.len() * n_features,
        };

        if rows.len() != y.len() * n_features {
            return Err(mismatch());
        }

        let x = ArrayView2::from_shape((y.len(), n_features), rows).map_err(|_| mismatch())?;
        Self::new(x, ArrayView1::from(y))
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// The feature matrix, in column-major order.
    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Writes the linear predictor `x_i · w` (plus the intercept) of every sample into `out`.
    ///
    /// # Arguments
    /// * `weights` - The weights, with the intercept at index 0 when `fit_intercept` is set.
    /// * `fit_intercept` - Whether `weights` carries an intercept.
    /// * `out` - A buffer of `n_samples` values.
    pub fn decision_function(&self, weights: &[f64], fit_intercept: bool, out: &mut [f64]) {
        debug_assert_eq!(weights.len(), self.n_features() + fit_intercept as usize);
        debug_assert_eq!(out.len(), self.n_samples());

        let (intercept, coefs) = split_intercept(weights, fit_intercept);
        let mut out = ArrayViewMut1::from(out);
        out.fill(intercept);
        linalg::general_mat_vec_mul(1.0, &self.x, &ArrayView1::from(coefs), 1.0, &mut out);
    }
}

/// Splits a weight vector into its intercept (`0.0` when not modeled) and its coefficients.
pub(crate) fn split_intercept(weights: &[f64], fit_intercept: bool) -> (f64, &[f64]) {
    match (fit_intercept, weights.split_first()) {
        (true, Some((&intercept, coefs))) => (intercept, coefs),
        _ => (0.0, weights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_targets_are_rejected() {
        let err = Dataset::from_rows(&[1., 2., 3., 4.], 2, &[1.]).unwrap_err();
        assert_eq!(
            err,
            FitErr::SizeMismatch {
                what: "features",
                got: 4,
                expected: 2
            }
        );
    }

    #[test]
    fn columns_are_contiguous() {
        let dataset = Dataset::from_rows(&[1., 2., 3., 4., 5., 6.], 2, &[0., 0., 0.]).unwrap();

        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
        assert_eq!(dataset.x().column(1).as_slice().unwrap(), [2., 4., 6.]);
    }

    #[test]
    fn decision_function_with_and_without_intercept() {
        let dataset = Dataset::from_rows(&[1., 2., 3., 4.], 2, &[0., 0.]).unwrap();
        let mut out = [0.; 2];

        dataset.decision_function(&[0.5, 1., -1.], true, &mut out);
        assert_eq!(out, [-0.5, -0.5]);

        dataset.decision_function(&[2., 1.], false, &mut out);
        assert_eq!(out, [4., 10.]);
    }
}
