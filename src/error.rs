use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, FitErr>;

/// The crate's error type.
///
/// Non-convergence of the solver or of the robust estimators is never an error, it is
/// reported through `OptimizationResult` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum FitErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    HistoryFull {
        updates: usize,
        max_iter: usize,
    },
    HistoryKeysMismatch {
        expected: Vec<&'static str>,
        got: Vec<&'static str>,
    },
    HistoryDuplicateKey {
        key: &'static str,
    },
    InvalidSpec {
        what: &'static str,
        reason: String,
    },
}

impl Display for FitErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch for {what}: got {got}, expected {expected}"),
            FitErr::HistoryFull { updates, max_iter } => write!(
                f,
                "the history already holds {updates} updates while max_iter={max_iter}"
            ),
            FitErr::HistoryKeysMismatch { expected, got } => write!(
                f,
                "the history expected the keys {expected:?} but received {got:?} instead"
            ),
            FitErr::HistoryDuplicateKey { key } => {
                write!(f, "the history received the key {key:?} more than once")
            }
            FitErr::InvalidSpec { what, reason } => write!(f, "invalid {what}: {reason}"),
        }
    }
}

impl Error for FitErr {}
