use super::LossFn;

/// Least squares loss, `½(y - z)²`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastSquares;

impl LeastSquares {
    /// Returns a new `LeastSquares`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for LeastSquares {
    fn value(&self, y: f64, z: f64) -> f64 {
        0.5 * (y - z).powi(2)
    }

    fn deriv(&self, y: f64, z: f64) -> f64 {
        z - y
    }

    fn lip(&self) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn batch_value_is_the_average() {
        let y = array![1., 2., 3.];
        let z = [1., 4., 0.];

        assert_eq!(LeastSquares.value_batch(y.view(), &z), (0. + 2. + 4.5) / 3.);
    }

    #[test]
    fn deriv_is_the_residual() {
        assert_eq!(LeastSquares.deriv(1.5, 4.), 2.5);
    }
}
