mod catoni;
mod derivatives;
mod estimator;
mod mean;
mod median_of_means;
mod root;
mod trimmed_mean;

pub use catoni::{
    CatoniHolland, MAX_FIXED_POINT_ITERS, StandardCatoni, catoni, estimate_sigma, gud,
    holland_catoni, khi, standard_catoni,
};
pub use derivatives::{Derivatives, EstimatorState};
pub use estimator::{Estimate, LocationEstimator};
pub use mean::Mean;
pub use median_of_means::MedianOfMeans;
pub use root::{RootResult, RootSettings, brent};
pub use trimmed_mean::TrimmedMean;
