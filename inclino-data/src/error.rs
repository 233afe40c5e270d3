/// Error types for series building, correction and report tables
use crate::bias::Axis;
use inclino_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    /// Reference and target campaigns have different reading counts
    #[error("Campaign shapes differ (reference: {reference} rows, target: {target} rows)")]
    ShapeMismatch { reference: usize, target: usize },

    /// Reference and target rows do not describe the same depth
    #[error("Row {row} is not aligned (reference depth {reference_depth}, target depth {target_depth})")]
    Alignment {
        row: usize,
        reference_depth: f64,
        target_depth: f64,
    },

    /// A correction boundary matches no row within tolerance
    #[error("No row within tolerance of depth {depth} for axis {axis} correction boundary")]
    BoundaryNotFound { axis: Axis, depth: f64 },

    /// Underlying sensor document error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No active campaign to tabulate
    #[error("No active campaigns with calculation data")]
    NoCampaigns,

    /// Requested campaign count is unusable
    #[error("Invalid number of campaigns: {0}")]
    InvalidCount(usize),
}

/// Type alias for Results using DataError
pub type Result<T> = std::result::Result<T, DataError>;
