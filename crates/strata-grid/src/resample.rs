//! Resolution change for grids: bicubic convolution with periodic boundaries.
//!
//! For a target cell `(x', y')` the source position is `(x'·W/W', y'·H/H')`.
//! Numeric grids interpolate the surrounding 4×4 source samples (offsets
//! `-1..=2`, wrapping modulo the source size) with separable Catmull-Rom
//! cubics. Masks and labels cannot be blended and take the source sample at
//! the floor of that position instead.
//!
//! Target rows are split into contiguous bands and filled on scoped worker
//! threads. Each band only reads the source, so the workers share nothing
//! mutable and are joined in order.

use std::ops::Range;

use crate::cell::{Cell, ScalarKind};
use crate::grid::Grid;

/// How cells are reconstructed at the new resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Separable bicubic convolution over a 4×4 neighbourhood.
    Bicubic,
    /// The source cell at the floor of the sample position.
    Nearest,
}

impl Filter {
    /// Filter used for `kind` when none is requested explicitly.
    pub fn for_kind(kind: ScalarKind) -> Self {
        if kind.is_numeric() {
            Filter::Bicubic
        } else {
            Filter::Nearest
        }
    }
}

/// Errors raised by [`Resampler`].
#[derive(Debug, thiserror::Error)]
pub enum ResampleError {
    /// The cell kind cannot go through the requested filter.
    #[error("cannot resample {kind} grid with {filter:?} filter")]
    UnsupportedScalarKind {
        /// Kind of the source grid.
        kind: ScalarKind,
        /// Requested filter.
        filter: Filter,
    },
    /// A target dimension is zero, or the cell count overflows `usize`.
    #[error("invalid target dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A worker thread could not be started.
    #[error("failed to spawn resample worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

/// Cubic convolution through `p1` (`t = 0`) and `p2` (`t = 1`), with tangents
/// taken from `p0` and `p3`.
#[inline]
pub fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    p1 + (-0.5 * p0 + 0.5 * p2) * t
        + (p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3) * t * t
        + (-0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3) * t * t * t
}

/// Bicubic interpolation of a 4×4 patch indexed `p[row][column]`.
///
/// Each row is interpolated along x with `tx`, then the four results along y
/// with `ty`. At `tx = ty = 0` the result is exactly `p[1][1]`.
#[inline]
pub fn bicubic(p: &[[f64; 4]; 4], tx: f64, ty: f64) -> f64 {
    let row = |r: &[f64; 4]| cubic(r[0], r[1], r[2], r[3], tx);
    cubic(row(&p[0]), row(&p[1]), row(&p[2]), row(&p[3]), ty)
}

/// Resamples grids to new dimensions, spreading target rows over threads.
#[derive(Clone, Debug)]
pub struct Resampler {
    threads: usize,
}

impl Resampler {
    /// A resampler using up to `threads` workers (at least one).
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    /// Runs everything on the calling thread.
    pub fn single_threaded() -> Self {
        Self::new(1)
    }

    /// One worker per logical CPU.
    pub fn with_defaults() -> Self {
        Self::new(num_cpus::get())
    }

    /// Upper bound on worker threads per call.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Resamples `source` to `width`×`height` with the default filter for its kind.
    pub fn resample<T: Cell>(
        &self,
        source: &Grid<T>,
        width: usize,
        height: usize,
    ) -> Result<Grid<T>, ResampleError> {
        self.resample_with(source, width, height, Filter::for_kind(T::KIND))
    }

    /// Resamples `source` to `width`×`height` with an explicit filter.
    ///
    /// Requesting [`Filter::Bicubic`] for a boolean or category grid fails with
    /// [`ResampleError::UnsupportedScalarKind`] before any cell is computed.
    pub fn resample_with<T: Cell>(
        &self,
        source: &Grid<T>,
        width: usize,
        height: usize,
        filter: Filter,
    ) -> Result<Grid<T>, ResampleError> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(ResampleError::InvalidDimensions { width, height });
        }
        let unsupported = || ResampleError::UnsupportedScalarKind {
            kind: T::KIND,
            filter,
        };
        if filter == Filter::Bicubic && !T::KIND.is_numeric() {
            return Err(unsupported());
        }

        let (src_w, src_h) = source.dimensions();
        let kind = T::KIND;
        tracing::debug!(
            %kind,
            ?filter,
            from = ?(src_w, src_h),
            to = ?(width, height),
            threads = self.threads,
            "resampling grid"
        );

        let cells = match filter {
            Filter::Nearest => self.fill(width, height, &|x, y| {
                source.get(x * src_w / width, y * src_h / height)
            })?,
            Filter::Bicubic => {
                let samples: Vec<f64> = source
                    .iter()
                    .map(|&cell| cell.to_real())
                    .collect::<Option<_>>()
                    .ok_or_else(unsupported)?;
                let values = self.fill(width, height, &|x, y| {
                    bicubic_at(&samples, src_w, src_h, x, y, width, height)
                })?;
                values
                    .into_iter()
                    .map(T::from_real)
                    .collect::<Option<Vec<T>>>()
                    .ok_or_else(unsupported)?
            }
        };
        Ok(Grid::from_raw_parts(width, height, cells))
    }

    /// Evaluates `sample(x, y)` for every target cell, row-major.
    fn fill<U, F>(&self, width: usize, height: usize, sample: &F) -> Result<Vec<U>, ResampleError>
    where
        U: Send,
        F: Fn(usize, usize) -> U + Sync,
    {
        let workers = self.threads.min(height);
        if workers <= 1 {
            return Ok(sample_rows(0..height, width, sample));
        }

        let rows_per_band = height.div_ceil(workers);
        std::thread::scope(|scope| -> Result<Vec<U>, ResampleError> {
            let mut handles = Vec::with_capacity(workers);
            for start in (0..height).step_by(rows_per_band) {
                let rows = start..(start + rows_per_band).min(height);
                let handle = std::thread::Builder::new()
                    .name("resample-worker".into())
                    .spawn_scoped(scope, move || sample_rows(rows, width, sample))
                    .map_err(ResampleError::WorkerSpawn)?;
                handles.push(handle);
            }

            let mut cells = Vec::with_capacity(width * height);
            for handle in handles {
                match handle.join() {
                    Ok(band) => cells.extend(band),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            Ok(cells)
        })
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn sample_rows<U>(rows: Range<usize>, width: usize, sample: &impl Fn(usize, usize) -> U) -> Vec<U> {
    let mut out = Vec::with_capacity(rows.len() * width);
    for y in rows {
        for x in 0..width {
            out.push(sample(x, y));
        }
    }
    out
}

/// Splits `i * src / dst` into its integer part and fraction without rounding.
#[inline]
fn source_position(i: usize, src: usize, dst: usize) -> (isize, f64) {
    let scaled = i * src;
    ((scaled / dst) as isize, (scaled % dst) as f64 / dst as f64)
}

#[inline]
fn wrap(i: isize, n: usize) -> usize {
    i.rem_euclid(n as isize) as usize
}

fn bicubic_at(
    samples: &[f64],
    src_w: usize,
    src_h: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> f64 {
    let (px, tx) = source_position(x, src_w, width);
    let (py, ty) = source_position(y, src_h, height);

    let mut patch = [[0.0; 4]; 4];
    for (dy, row) in patch.iter_mut().enumerate() {
        let sy = wrap(py + dy as isize - 1, src_h);
        for (dx, value) in row.iter_mut().enumerate() {
            let sx = wrap(px + dx as isize - 1, src_w);
            *value = samples[sy * src_w + sx];
        }
    }
    bicubic(&patch, tx, ty)
}
