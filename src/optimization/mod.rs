mod coordinate_descent;
mod gradient_descent;
mod problem;
mod solver;
mod steps;
mod update_cycle;

pub use coordinate_descent::{CoordinateCycle, CoordinateSolver};
pub use gradient_descent::{FullBatchSolver, GradientCycle};
pub use problem::Problem;
pub use solver::Solver;
pub use steps::{coordinate_steps, full_batch_step};
pub use update_cycle::{CycleStats, UpdateCycle};
