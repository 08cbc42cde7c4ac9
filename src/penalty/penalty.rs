/// A separable regularizer `strength · Σ ρ(w_j)` and its proximal operator.
///
/// The intercept is never handed to a `Penalty`.
pub trait Penalty {
    /// The regularization strength.
    fn strength(&self) -> f64;

    /// Applies the proximal operator of `ρ` to a single coordinate.
    ///
    /// # Arguments
    /// * `x` - The candidate value, after an unpenalized step.
    /// * `step` - The step size already scaled by `strength`.
    fn apply_one_unscaled(&self, x: f64, step: f64) -> f64;

    /// The unscaled penalty `ρ(w_j)` of a single coordinate.
    fn value_one(&self, w: f64) -> f64;

    /// The penalty of a weight vector (without intercept).
    fn value(&self, weights: &[f64]) -> f64 {
        let total: f64 = weights.iter().map(|&w| self.value_one(w)).sum();
        self.strength() * total
    }
}
