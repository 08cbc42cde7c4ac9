mod elastic_net;
mod l1;
mod l2;
mod no_penalty;
mod penalty;

pub use elastic_net::ElasticNet;
pub use l1::L1;
pub use l2::L2Sq;
pub use no_penalty::NoPenalty;
pub use penalty::Penalty;

/// Soft-thresholding: shrinks `x` towards zero by `t`, snapping to exactly `0.0` inside `[-t, t]`.
pub(crate) fn soft_threshold(x: f64, t: f64) -> f64 {
    if x > t {
        x - t
    } else if x < -t {
        x + t
    } else {
        0.0
    }
}
