use std::f64::consts::FRAC_PI_2;

use super::{Estimate, LocationEstimator, RootSettings, brent};

/// Safety cap on the fixed-point iterations of the scale and location estimates.
///
/// On well-behaved samples the scale converges in a few dozen iterations and the location
/// in a handful.
pub const MAX_FIXED_POINT_ITERS: usize = 1000;

/// Catoni's influence function, `sign(t)·ln(1 + |t| + t²/2)`.
pub fn catoni(t: f64) -> f64 {
    (t.abs() + t * t / 2.0).ln_1p().copysign(t)
}

/// The bounded function driving the scale estimate, `0.62 - 1/(1 + t²)`.
pub fn khi(t: f64) -> f64 {
    0.62 - 1.0 / (1.0 + t * t)
}

/// The Gudermannian influence function, saturated at `π/2` from `t = 12` on.
pub fn gud(t: f64) -> f64 {
    if t < 12.0 {
        2.0 * t.exp().atan() - FRAC_PI_2
    } else {
        FRAC_PI_2
    }
}

fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

// Mirrors `allclose(x, x[0])`: every element within 1e-8 + 1e-5·|x[0]| of the first one.
fn is_constant(x: &[f64], first: f64) -> bool {
    let tol = 1e-8 + 1e-5 * first.abs();
    x.iter().all(|&v| (first - v).abs() <= tol)
}

/// Estimates a robust dispersion scale of `x` by fixed-point iteration on `σ`, starting from
/// `σ = 1`, until `σ` moves less than `eps`.
///
/// # Arguments
/// * `x` - A non-constant sample.
/// * `eps` - The tolerance on `σ`.
/// * `max_iter` - The iteration cap.
pub fn estimate_sigma(x: &[f64], eps: f64, max_iter: usize) -> Estimate {
    let center = mean(x);
    let khi0 = khi(0.0);
    let mut sigma = 1.0;

    for _ in 0..max_iter {
        let mean_khi = x.iter().map(|&v| khi((v - center) / sigma)).sum::<f64>() / x.len() as f64;
        let next = sigma * (1.0 - mean_khi / khi0).sqrt();
        let delta = (next - sigma).abs();
        sigma = next;

        if delta <= eps {
            return Estimate::exact(sigma);
        }

        if delta.is_nan() {
            break;
        }
    }

    Estimate {
        value: sigma,
        converged: false,
    }
}

/// The Catoni-Holland estimate of the location of `x`.
///
/// Constant samples are returned as is. Otherwise the scale from `estimate_sigma` is
/// rescaled by `√(n / ln(1/eps))` and the location is found by fixed-point iteration on
/// `m ← m + s·mean(gud((x - m)/s))` starting from `m = 0`.
///
/// # Arguments
/// * `x` - A non-empty sample.
/// * `eps` - The confidence parameter, in `(0, 1)`, also used as the iterations tolerance.
/// * `max_iter` - The cap applied to each of the two fixed-point loops.
///
/// # Returns
/// The last iterate, flagged as not converged if any loop hit the cap.
pub fn holland_catoni(x: &[f64], eps: f64, max_iter: usize) -> Estimate {
    let Some(&first) = x.first() else {
        return Estimate {
            value: f64::NAN,
            converged: false,
        };
    };

    if is_constant(x, first) {
        return Estimate::exact(first);
    }

    let n = x.len() as f64;
    let sigma = estimate_sigma(x, eps, max_iter);
    let s = sigma.value * (n / (1.0 / eps).ln()).sqrt();

    if !(s > 0.0 && s.is_finite()) {
        return Estimate {
            value: mean(x),
            converged: false,
        };
    }

    let mut m = 0.0;

    for _ in 0..max_iter {
        let step = x.iter().map(|&v| gud((v - m) / s)).sum::<f64>() / n;
        let next = m + s * step;
        let diff = (next - m).abs();
        m = next;

        if diff <= eps {
            return Estimate {
                value: m,
                converged: sigma.converged,
            };
        }

        if diff.is_nan() {
            break;
        }
    }

    Estimate {
        value: m,
        converged: false,
    }
}

/// The standard Catoni estimate: the root `u` of `mean(catoni((x - u)/σ)) = 0` inside
/// `[min(x), max(x)]`, found with Brent's method.
///
/// # Arguments
/// * `x` - A non-empty sample.
/// * `eps` - The tolerance of the scale estimate.
/// * `max_iter` - The iteration cap of the scale estimate.
pub fn standard_catoni(x: &[f64], eps: f64, max_iter: usize) -> Estimate {
    let Some(&first) = x.first() else {
        return Estimate {
            value: f64::NAN,
            converged: false,
        };
    };

    if is_constant(x, first) {
        return Estimate::exact(first);
    }

    let sigma = estimate_sigma(x, eps, max_iter);
    let s = sigma.value;
    let (lo, hi) = x
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let score = |u: f64| s * x.iter().map(|&v| catoni((v - u) / s)).sum::<f64>() / x.len() as f64;

    match brent(score, lo, hi, RootSettings::default()) {
        Some(root) => Estimate {
            value: root.x,
            converged: root.converged && sigma.converged,
        },
        None => Estimate {
            value: mean(x),
            converged: false,
        },
    }
}

/// The Catoni-Holland ("CH") robust location estimator.
#[derive(Debug, Clone, Copy)]
pub struct CatoniHolland {
    eps: f64,
    max_iter: usize,
}

impl CatoniHolland {
    /// Creates a new `CatoniHolland` estimator.
    ///
    /// # Arguments
    /// * `eps` - The confidence parameter, in `(0, 1)`.
    pub fn new(eps: f64) -> Self {
        Self {
            eps,
            max_iter: MAX_FIXED_POINT_ITERS,
        }
    }

    /// Overrides the cap on the fixed-point iterations.
    pub fn with_max_iter(self, max_iter: usize) -> Self {
        Self { max_iter, ..self }
    }
}

impl Default for CatoniHolland {
    fn default() -> Self {
        Self::new(0.001)
    }
}

impl LocationEstimator for CatoniHolland {
    fn estimate(&self, x: &[f64]) -> Estimate {
        holland_catoni(x, self.eps, self.max_iter)
    }
}

/// The root-finding formulation of Catoni's estimator.
#[derive(Debug, Clone, Copy)]
pub struct StandardCatoni {
    eps: f64,
    max_iter: usize,
}

impl StandardCatoni {
    /// Creates a new `StandardCatoni` estimator.
    ///
    /// # Arguments
    /// * `eps` - The tolerance of the scale estimate, in `(0, 1)`.
    pub fn new(eps: f64) -> Self {
        Self {
            eps,
            max_iter: MAX_FIXED_POINT_ITERS,
        }
    }
}

impl Default for StandardCatoni {
    fn default() -> Self {
        Self::new(0.001)
    }
}

impl LocationEstimator for StandardCatoni {
    fn estimate(&self, x: &[f64]) -> Estimate {
        standard_catoni(x, self.eps, self.max_iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn influence_functions() {
        assert_abs_diff_eq!(khi(0.0), -0.38, epsilon = 1e-15);
        assert_abs_diff_eq!(khi(1.0), 0.12, epsilon = 1e-15);

        assert_eq!(gud(0.0), 0.0);
        assert_eq!(gud(12.0), FRAC_PI_2);
        assert_eq!(gud(1e6), FRAC_PI_2);
        assert_abs_diff_eq!(gud(-1.3), -gud(1.3), epsilon = 1e-15);
        assert_abs_diff_eq!(gud(-50.0), -FRAC_PI_2, epsilon = 1e-15);

        assert_eq!(catoni(0.0), 0.0);
        assert_abs_diff_eq!(catoni(1.0), 2.5f64.ln(), epsilon = 1e-15);
        assert_eq!(catoni(-2.0), -catoni(2.0));
    }

    #[test]
    fn constant_samples_are_returned_as_is() {
        for &c in &[0.0, 1.0, -3.25, 1e10, -7e-12] {
            let x = vec![c; 17];

            assert_eq!(holland_catoni(&x, 0.001, MAX_FIXED_POINT_ITERS), Estimate::exact(c));
            assert_eq!(standard_catoni(&x, 0.001, MAX_FIXED_POINT_ITERS), Estimate::exact(c));
        }
    }

    #[test]
    fn nearly_constant_samples_short_circuit() {
        let x = [100.0, 100.0 + 1e-4, 100.0 - 5e-4];
        assert_eq!(CatoniHolland::default().estimate(&x).value, 100.0);
    }

    #[test]
    fn single_outlier_is_damped() {
        let mut x: Vec<f64> = (0..40).map(|i| (i % 5) as f64 - 2.0).collect();
        x.push(30.0);

        let estimate = CatoniHolland::default().estimate(&x);

        assert!(estimate.converged);
        assert!(mean(&x) > 0.7);
        assert!(estimate.value.abs() < 0.3, "estimate = {}", estimate.value);
    }

    #[test]
    fn sigma_follows_the_sample_scale() {
        let x: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64 / 50.0 - 1.0).collect();
        let wide: Vec<f64> = x.iter().map(|v| v * 10.0).collect();

        let sigma = estimate_sigma(&x, 1e-6, MAX_FIXED_POINT_ITERS);
        let sigma_wide = estimate_sigma(&wide, 1e-6, MAX_FIXED_POINT_ITERS);

        assert!(sigma.converged && sigma_wide.converged);
        assert_abs_diff_eq!(sigma_wide.value / sigma.value, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn hitting_the_cap_is_not_fatal() {
        let x: Vec<f64> = (0..50).map(|i| (i as f64).sin() * 5.0 + 3.0).collect();
        let estimate = CatoniHolland::new(1e-3).with_max_iter(1).estimate(&x);

        assert!(!estimate.converged);
        assert!(estimate.value.is_finite());
    }

    #[test]
    fn empty_sample() {
        assert!(!holland_catoni(&[], 0.001, 10).converged);
    }
}
