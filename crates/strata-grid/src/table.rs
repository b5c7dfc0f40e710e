//! Band tables: ordered thresholds and percentile-keyed quantiles.
//!
//! Both tables partition the real line into half-open bands `[lower, upper)`,
//! with the first band unbounded below and the last unbounded above. Stored
//! boundaries are compared as-is, without tolerance.

mod quantile;
mod threshold;

pub use quantile::{PERCENTILE_KEYS, QuantileTable};
pub use threshold::{Threshold, ThresholdTable};

/// Errors raised when a table violates its ordering invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// The table has no entries.
    #[error("band table is empty")]
    Empty,
    /// Two entries share a label.
    #[error("duplicate band label: {0}")]
    DuplicateLabel(String),
    /// A boundary is NaN or infinite.
    #[error("boundary of band {label} is not finite: {value}")]
    NonFinite {
        /// Band label (or percentile key) of the offending entry.
        label: String,
        /// The rejected value.
        value: f64,
    },
    /// Boundaries are not strictly increasing.
    #[error("boundary of band {label} ({value}) does not exceed the previous boundary ({previous})")]
    NotIncreasing {
        /// Band whose boundary is out of order.
        label: String,
        /// Its boundary.
        value: f64,
        /// The boundary of the band before it.
        previous: f64,
    },
    /// An entry other than the last has no boundary, or the last has one.
    #[error("only the last band may be open-ended (offending band: {0})")]
    OpenBand(String),
    /// A percentile key is outside `0..=100`.
    #[error("percentile key {0} is out of range")]
    KeyOutOfRange(u8),
    /// A higher percentile key has a higher boundary than a lower key.
    #[error("quantile {key} ({value}) exceeds quantile {lower_key} ({lower_value})")]
    QuantileOrder {
        /// The higher key.
        key: u8,
        /// Its boundary.
        value: f64,
        /// The next lower key.
        lower_key: u8,
        /// Its boundary.
        lower_value: f64,
    },
}
