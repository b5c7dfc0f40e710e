//! Raster primitives for the strata world stack: typed 2-D grids, band tables,
//! layers, and the bicubic resampling engine.

mod cell;
mod grid;
mod layer;
mod resample;

pub mod table;

pub use cell::{Cell, ScalarKind};
pub use grid::{Grid, GridError};
pub use layer::Layer;
pub use resample::{Filter, ResampleError, Resampler, bicubic, cubic};
pub use table::{PERCENTILE_KEYS, QuantileTable, TableError, Threshold, ThresholdTable};
