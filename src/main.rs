use std::{env, fs};

use anyhow::Context;
use log::info;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

use robust_linear::{Dataset, FitSpec, LinearModel, SolverBuilder, training::EstimatorSpec};

const N_SAMPLES: usize = 1000;
const N_FEATURES: usize = 5;
const CORRUPTED_SHARE: f64 = 0.05;
const DATA_SEED: u64 = 42;

/// Draws a noisy linearly separable training set and a clean test set, then corrupts a share of
/// the training rows with huge feature values.
fn synthetic_data() -> anyhow::Result<(Dataset, Array2<f64>, Vec<f64>)> {
    let mut rng = StdRng::seed_from_u64(DATA_SEED);
    let normal = Normal::new(0.0, 1.0)?;
    let coefs: Vec<f64> = (0..N_FEATURES).map(|_| normal.sample(&mut rng)).collect();

    let draw = |rng: &mut StdRng| {
        let x: Vec<f64> = (0..N_FEATURES).map(|_| normal.sample(rng)).collect();
        let z: f64 = x.iter().zip(&coefs).map(|(x, w)| x * w).sum::<f64>() + 0.5;
        let y = if z + 0.3 * normal.sample(rng) > 0.0 { 1.0 } else { -1.0 };
        (x, y)
    };

    let mut rows = Vec::with_capacity(N_SAMPLES * N_FEATURES);
    let mut y = Vec::with_capacity(N_SAMPLES);

    for _ in 0..N_SAMPLES {
        let (mut x, label) = draw(&mut rng);

        if rng.random_bool(CORRUPTED_SHARE) {
            x.iter_mut().for_each(|v| *v *= 1000.0);
        }

        rows.extend(x);
        y.push(label);
    }

    let mut test_rows = Vec::with_capacity(N_SAMPLES * N_FEATURES);
    let mut test_y = Vec::with_capacity(N_SAMPLES);

    for _ in 0..N_SAMPLES {
        let (x, label) = draw(&mut rng);
        test_rows.extend(x);
        test_y.push(label);
    }

    let dataset = Dataset::from_rows(&rows, N_FEATURES, &y)?;
    let test_x = Array2::from_shape_vec((N_SAMPLES, N_FEATURES), test_rows)?;

    Ok((dataset, test_x, test_y))
}

fn read_spec() -> anyhow::Result<FitSpec> {
    let Some(path) = env::args().nth(1) else {
        return Ok(FitSpec::default());
    };

    let raw = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let spec = read_spec()?;
    let (dataset, test_x, test_y) = synthetic_data()?;

    info!(
        n_samples = dataset.n_samples(),
        n_features = dataset.n_features();
        "generated training set"
    );

    let baseline = FitSpec {
        estimator: EstimatorSpec::Erm,
        ..spec.clone()
    };

    for (name, spec) in [("robust", spec), ("erm", baseline)] {
        let mut fit = SolverBuilder::new().build(&spec, &dataset)?;
        let result = fit.solve(None)?;

        println!("{}", fit.history());

        if let Some(message) = result.message() {
            println!("{message}");
        }

        let n_iter = result.n_iter();
        let success = result.success();
        let model = LinearModel::from_result(result, spec.fit_intercept);
        let predictions = model.predict(test_x.view())?;
        let hits = predictions
            .iter()
            .zip(&test_y)
            .filter(|(p, y)| p == y)
            .count();

        println!(
            "{name}: n_iter={n_iter} success={success} test accuracy={:.3}",
            hits as f64 / test_y.len() as f64
        );
    }

    Ok(())
}
