//! A grid together with the tables used to classify its values.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::grid::Grid;
use crate::resample::{ResampleError, Resampler};
use crate::table::{QuantileTable, ThresholdTable};

/// One named raster field of a world plus its classification metadata.
///
/// A layer with neither table is a bare grid (ocean mask, plate ids, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Layer<T> {
    /// Cell values.
    pub data: Grid<T>,
    /// Named bands, for layers classified by fixed boundaries.
    pub thresholds: Option<ThresholdTable>,
    /// Percentile boundaries, for layers classified by distribution.
    pub quantiles: Option<QuantileTable>,
}

impl<T> Layer<T> {
    /// A layer without classification tables.
    pub fn bare(data: Grid<T>) -> Self {
        Self {
            data,
            thresholds: None,
            quantiles: None,
        }
    }

    /// A layer banded by `thresholds`.
    pub fn with_thresholds(data: Grid<T>, thresholds: ThresholdTable) -> Self {
        Self {
            data,
            thresholds: Some(thresholds),
            quantiles: None,
        }
    }

    /// A layer banded by `quantiles`.
    pub fn with_quantiles(data: Grid<T>, quantiles: QuantileTable) -> Self {
        Self {
            data,
            thresholds: None,
            quantiles: Some(quantiles),
        }
    }

    /// Dimensions of the underlying grid.
    pub fn dimensions(&self) -> (usize, usize) {
        self.data.dimensions()
    }
}

impl<T: Cell> Layer<T> {
    /// Cell value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of range.
    #[inline]
    pub fn value(&self, x: usize, y: usize) -> T {
        self.data.get(x, y)
    }

    /// Resamples the grid. Tables describe value space, not resolution, and
    /// are carried over unchanged.
    pub fn resample(
        &self,
        width: usize,
        height: usize,
        resampler: &Resampler,
    ) -> Result<Self, ResampleError> {
        Ok(Self {
            data: resampler.resample(&self.data, width, height)?,
            thresholds: self.thresholds.clone(),
            quantiles: self.quantiles.clone(),
        })
    }
}

impl Layer<f64> {
    /// Threshold band label of the cell at `(x, y)`, if the layer has thresholds.
    pub fn band_at(&self, x: usize, y: usize) -> Option<&str> {
        let value = self.value(x, y);
        self.thresholds.as_ref().map(|t| t.band(value))
    }
}
