use ndarray::ArrayView1;

/// A per-sample loss `ℓ(y, z)` of a linear predictor `z` against its target `y`.
pub trait LossFn {
    /// The loss of a single sample.
    fn value(&self, y: f64, z: f64) -> f64;

    /// The derivative of the loss with respect to the predictor `z`.
    fn deriv(&self, y: f64, z: f64) -> f64;

    /// The Lipschitz constant of `deriv` in `z`, used to derive the step sizes.
    fn lip(&self) -> f64;

    /// The average loss over a batch of samples.
    ///
    /// # Arguments
    /// * `y` - The targets.
    /// * `inner_products` - The linear predictor of each sample.
    fn value_batch(&self, y: ArrayView1<f64>, inner_products: &[f64]) -> f64 {
        if inner_products.is_empty() {
            return 0.0;
        }

        let total: f64 = y
            .iter()
            .zip(inner_products)
            .map(|(&yi, &zi)| self.value(yi, zi))
            .sum();

        total / inner_products.len() as f64
    }
}
