//! Fixed-size, row-major 2-D raster.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// Errors raised when building a [`Grid`] from external data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Width or height is zero.
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    Empty {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A row does not have the same length as the first row.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// The flat cell buffer does not match `width * height`.
    #[error("expected {expected} cells for the given dimensions, got {actual}")]
    CellCount {
        /// `width * height`.
        expected: usize,
        /// Buffer length.
        actual: usize,
    },
    /// `width * height` does not fit in `usize`.
    #[error("grid dimensions {width}x{height} overflow")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
}

/// A rectangular grid of cells, indexed `(x, y)` with `(0, 0)` at the top-left.
///
/// Cells are stored row-major, so row `y` occupies
/// `cells[y * width..(y + 1) * width]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawGrid<T>",
    bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>")
)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Unchecked wire form; validated on the way into [`Grid`].
#[derive(Deserialize)]
struct RawGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        Grid::from_vec(raw.width, raw.height, raw.cells)
    }
}

impl<T> Grid<T> {
    /// Wraps a row-major buffer.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Wraps a buffer already known to match the dimensions.
    pub(crate) fn from_raw_parts(width: usize, height: usize, cells: Vec<T>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a grid from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        let mut cells = Vec::with_capacity(cell_count(width, height)?);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or `width * height` overflows.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        let Some(len) = width.checked_mul(height) else {
            panic!("grid dimensions {width}x{height} overflow");
        };
        let mut cells = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns `true` if the signed coordinate lies inside the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> {
        self.cells.chunks_exact(self.width)
    }

    /// Iterates cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }
}

impl<T: Copy> Grid<T> {
    /// A grid with every cell set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self::from_fn(width, height, |_, _| value)
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.cells[self.index_of(x, y)]
    }

    /// Like [`Grid::get`], but `None` off the grid.
    pub fn try_get(&self, x: usize, y: usize) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Overwrites the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of range.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index_of(x, y);
        self.cells[idx] = value;
    }

    /// Applies `f` to every cell, keeping the dimensions.
    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }

    /// Copies the grid out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T: Cell + PartialOrd> Grid<T> {
    /// Smallest cell value. Incomparable values (NaN) are skipped.
    pub fn min(&self) -> T {
        self.fold_extreme(|candidate, current| candidate < current)
    }

    /// Largest cell value. Incomparable values (NaN) are skipped.
    pub fn max(&self) -> T {
        self.fold_extreme(|candidate, current| candidate > current)
    }

    fn fold_extreme(&self, better: impl Fn(&T, &T) -> bool) -> T {
        let mut best = self.cells[0];
        for value in &self.cells[1..] {
            if better(value, &best) || best.partial_cmp(&best).is_none() {
                best = *value;
            }
        }
        best
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    width
        .checked_mul(height)
        .ok_or(GridError::TooLarge { width, height })
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.cells[self.index_of(x, y)]
    }
}
