/// The outcome of a solve: the last weights computed and how the loop ended.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    weights: Vec<f64>,
    n_iter: usize,
    success: bool,
    tol: f64,
    message: Option<String>,
}

impl OptimizationResult {
    pub(crate) fn new(
        weights: Vec<f64>,
        n_iter: usize,
        success: bool,
        tol: f64,
        message: Option<String>,
    ) -> Self {
        Self {
            weights,
            n_iter,
            success,
            tol,
            message,
        }
    }

    /// The final weights, intercept first when modeled.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The amount of iterations run, the initial state excluded.
    ///
    /// It is the iteration that met the tolerance on success and `max_iter` when the budget ran
    /// out, so the history always holds `n_iter + 1` records.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Whether the relative tolerance fell below the requested one.
    pub fn success(&self) -> bool {
        self.success
    }

    /// The relative tolerance of the last iteration, not the requested one.
    pub fn tol(&self) -> f64 {
        self.tol
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn into_weights(self) -> Vec<f64> {
        self.weights
    }
}
