use strata_grid::{GridError, ResampleError, TableError};

/// Errors raised while building or transforming a [`World`](crate::World).
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Width or height is zero, or the cell count overflows `usize`.
    #[error("world dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A layer's grid does not match the world's dimensions.
    #[error("layer {layer} is {found:?}, world is {expected:?}")]
    ShapeMismatch {
        /// Layer name.
        layer: &'static str,
        /// World dimensions.
        expected: (usize, usize),
        /// Grid dimensions.
        found: (usize, usize),
    },
    /// A threshold table does not carry the band labels the layer requires.
    #[error("layer {layer} needs bands [{expected}], got {found:?}")]
    ThresholdLayout {
        /// Layer name.
        layer: &'static str,
        /// Labels of the primary accepted layout, comma separated.
        expected: String,
        /// Labels of the rejected table.
        found: Vec<String>,
    },
    /// The humidity quantile table lacks one of the canonical percentile keys.
    #[error("humidity quantiles are missing key {0}")]
    MissingQuantile(u8),
    /// A band table failed validation.
    #[error(transparent)]
    Table(#[from] TableError),
    /// A grid failed validation.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Rescaling a layer failed.
    #[error(transparent)]
    Resample(#[from] ResampleError),
}
