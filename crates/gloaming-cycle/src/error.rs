//! Day-cycle error types.

/// Errors raised while building a day cycle. All of them are startup errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CycleError {
    /// The phase-length table does not have one entry per phase.
    #[error("phase length table has {actual} entries, expected {expected}")]
    DurationTableMismatch { expected: usize, actual: usize },

    /// Debug randomization was asked for an empty or non-finite range.
    #[error("invalid random phase length range [{min}, {max})")]
    InvalidRandomRange { min: f64, max: f64 },
}
