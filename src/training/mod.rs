mod builder;
mod history;
mod result;
mod solver_loop;
mod specs;

pub use builder::SolverBuilder;
pub use history::History;
pub use result::OptimizationResult;
pub use solver_loop::{Fit, SolverLoop};
pub use specs::{EstimatorSpec, FitSpec, LossSpec, PenaltySpec, SolverSpec};
