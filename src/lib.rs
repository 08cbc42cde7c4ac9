pub mod dataset;
pub mod error;
pub mod estimation;
pub mod loss;
pub mod model;
pub mod optimization;
pub mod penalty;
pub mod training;

pub use dataset::Dataset;
pub use error::{FitErr, Result};
pub use model::LinearModel;
pub use training::{Fit, FitSpec, History, OptimizationResult, SolverBuilder, SolverLoop};
