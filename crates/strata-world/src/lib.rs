//! The world raster stack: a named set of co-registered layers with
//! classification queries, whole-stack rescaling and a versioned binary
//! encoding.
//!
//! A [`World`] owns one optional [`Layer`](strata_grid::Layer) per field.
//! Setters validate shape and table layout before storing anything, so a
//! world is either fully consistent or the call failed and nothing changed.

mod error;
pub mod format;
mod query;
pub mod snapshot;
mod step;
pub mod thresholds;
mod world;

pub use error::WorldError;
pub use format::{FORMAT_TAG, FORMAT_VERSION, FormatError, FormatVersion};
pub use query::Level;
pub use snapshot::SnapshotError;
pub use step::{Step, UnknownStep};
pub use world::World;
