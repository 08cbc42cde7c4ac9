/// Stopping criteria for `brent`.
#[derive(Debug, Clone, Copy)]
pub struct RootSettings {
    /// Absolute tolerance on the root.
    pub xtol: f64,
    /// Relative tolerance on the root.
    pub rtol: f64,
    /// Maximum amount of iterations.
    pub max_iter: usize,
}

impl Default for RootSettings {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 100,
        }
    }
}

/// The outcome of a scalar root search.
#[derive(Debug, Clone, Copy)]
pub struct RootResult {
    /// Approximate root.
    pub x: f64,
    /// Function value at `x`.
    pub fx: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the bracket shrank below the tolerance.
    pub converged: bool,
}

/// Finds a root of `f` inside `[a, b]` with Brent's method (bisection, secant and inverse
/// quadratic interpolation).
///
/// # Arguments
/// * `f` - The function, continuous on the bracket.
/// * `a` - One end of the bracket.
/// * `b` - The other end of the bracket.
/// * `settings` - The stopping criteria.
///
/// # Returns
/// The root, or `None` if `f(a)` and `f(b)` have the same sign. When the iteration budget
/// runs out the last iterate is returned with `converged` unset.
pub fn brent<F>(mut f: F, a: f64, b: f64, settings: RootSettings) -> Option<RootResult>
where
    F: FnMut(f64) -> f64,
{
    let RootSettings {
        xtol,
        rtol,
        max_iter,
    } = settings;

    let (mut xpre, mut xcur) = (a, b);
    let (mut fpre, mut fcur) = (f(xpre), f(xcur));
    let (mut xblk, mut fblk) = (0.0, 0.0);
    let (mut spre, mut scur) = (0.0, 0.0);

    if fpre * fcur > 0.0 {
        return None;
    }

    let found = |x, fx, iterations| {
        Some(RootResult {
            x,
            fx,
            iterations,
            converged: true,
        })
    };

    if fpre == 0.0 {
        return found(xpre, fpre, 0);
    }

    if fcur == 0.0 {
        return found(xcur, fcur, 0);
    }

    for i in 0..max_iter {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }

        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (xtol + rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;

        if fcur == 0.0 || sbis.abs() < delta {
            return found(xcur, fcur, i);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic interpolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;

        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += delta.copysign(sbis);
        }

        fcur = f(xcur);
    }

    Some(RootResult {
        x: xcur,
        fx: fcur,
        iterations: max_iter,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn finds_the_square_root_of_two() {
        let root = brent(|x| x * x - 2.0, 0.0, 2.0, RootSettings::default()).unwrap();

        assert!(root.converged);
        assert_abs_diff_eq!(root.x, 2f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn reversed_bracket() {
        let root = brent(|x| x.cos(), 3.0, 0.0, RootSettings::default()).unwrap();
        assert_abs_diff_eq!(root.x, std::f64::consts::FRAC_PI_2, epsilon = 1e-10);
    }

    #[test]
    fn root_on_the_bracket() {
        let root = brent(|x| x - 1.0, 1.0, 5.0, RootSettings::default()).unwrap();

        assert_eq!(root.x, 1.0);
        assert_eq!(root.iterations, 0);
    }

    #[test]
    fn invalid_bracket() {
        assert!(brent(|x| x * x + 1.0, -1.0, 1.0, RootSettings::default()).is_none());
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let settings = RootSettings {
            max_iter: 1,
            ..RootSettings::default()
        };

        let root = brent(|x| x.powi(3) - 0.3, 0.0, 1.0, settings).unwrap();
        assert!(!root.converged);
    }
}
