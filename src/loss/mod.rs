mod least_squares;
mod logistic;
mod loss_fn;

pub use least_squares::LeastSquares;
pub use logistic::Logistic;
pub use loss_fn::LossFn;
