use ndarray::ArrayView2;

/// The per-coordinate step sizes of coordinate descent: `1/lip` for the intercept and
/// `1/(lip · ‖X_j‖² / n)` for feature `j`.
///
/// A column of zeros gets a step of `0`, its coordinate has no effect on the objective.
///
/// # Arguments
/// * `lip` - The Lipschitz constant of the loss derivative.
/// * `x` - The feature matrix.
/// * `fit_intercept` - Whether an intercept is modeled.
pub fn coordinate_steps(lip: f64, x: ArrayView2<f64>, fit_intercept: bool) -> Vec<f64> {
    let n = x.nrows() as f64;
    let intercept = fit_intercept.then(|| 1.0 / lip);

    let features = x.columns().into_iter().map(|column| {
        let lip_j = lip * column.dot(&column) / n;

        if lip_j > 0.0 { 1.0 / lip_j } else { 0.0 }
    });

    intercept.into_iter().chain(features).collect()
}

/// The single step size of full-batch gradient descent,
/// `1/(lip · (‖X‖²_F / n + fit_intercept))`.
///
/// # Arguments
/// * `lip` - The Lipschitz constant of the loss derivative.
/// * `x` - The feature matrix.
/// * `fit_intercept` - Whether an intercept is modeled.
pub fn full_batch_step(lip: f64, x: ArrayView2<f64>, fit_intercept: bool) -> f64 {
    let n = x.nrows() as f64;
    let frobenius_sq: f64 = x.iter().map(|v| v * v).sum();
    let lip_all = lip * (frobenius_sq / n + fit_intercept as u8 as f64);

    if lip_all > 0.0 { 1.0 / lip_all } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn coordinate_steps_follow_the_column_norms() {
        let x = array![[1., 0.], [1., 0.], [2., 0.], [0., 0.]];

        let steps = coordinate_steps(0.25, x.view(), true);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], 4.);
        // ‖X_0‖² / n = 6 / 4
        assert_abs_diff_eq!(steps[1], 1. / (0.25 * 1.5), epsilon = 1e-12);
        assert_eq!(steps[2], 0.);

        let steps = coordinate_steps(1., x.view(), false);
        assert_eq!(steps.len(), 2);
        assert_abs_diff_eq!(steps[0], 1. / 1.5, epsilon = 1e-12);
    }

    #[test]
    fn full_batch_step_uses_the_frobenius_norm() {
        let x = array![[1., 2.], [3., 4.]];

        // ‖X‖²_F / n = 30 / 2
        assert_abs_diff_eq!(full_batch_step(1., x.view(), false), 1. / 15., epsilon = 1e-12);
        assert_abs_diff_eq!(full_batch_step(0.25, x.view(), true), 1. / 4., epsilon = 1e-12);
    }
}
