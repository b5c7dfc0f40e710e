//! Percentile-keyed boundary table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TableError;

/// Percentile keys the world generator computes for humidity.
pub const PERCENTILE_KEYS: [u8; 7] = [12, 25, 37, 50, 62, 75, 87];

/// Boundaries keyed by percentile.
///
/// Key `k` holds the value exceeded by `k` percent of the layer, so larger keys
/// map to smaller (or equal) boundaries. Bands are ordered by boundary: band 0
/// lies below the boundary of the largest key, the last band at or above the
/// boundary of the smallest key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u8, f64>", into = "BTreeMap<u8, f64>")]
pub struct QuantileTable {
    boundaries: BTreeMap<u8, f64>,
}

impl QuantileTable {
    /// Validates and wraps `boundaries`.
    ///
    /// Keys must lie in `0..=100` with finite values that do not increase
    /// as the key grows.
    pub fn new(boundaries: BTreeMap<u8, f64>) -> Result<Self, TableError> {
        if boundaries.is_empty() {
            return Err(TableError::Empty);
        }
        let mut lower: Option<(u8, f64)> = None;
        for (&key, &value) in &boundaries {
            if key > 100 {
                return Err(TableError::KeyOutOfRange(key));
            }
            if !value.is_finite() {
                return Err(TableError::NonFinite {
                    label: key.to_string(),
                    value,
                });
            }
            if let Some((lower_key, lower_value)) = lower
                && value > lower_value
            {
                return Err(TableError::QuantileOrder {
                    key,
                    value,
                    lower_key,
                    lower_value,
                });
            }
            lower = Some((key, value));
        }
        Ok(Self { boundaries })
    }

    /// Convenience constructor from `(key, boundary)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u8, f64)>) -> Result<Self, TableError> {
        Self::new(pairs.into_iter().collect())
    }

    /// Computes boundaries for `keys` from a sample of layer values.
    ///
    /// The boundary for key `k` is the sample value with `k` percent of the
    /// sample strictly or equally above it (nearest rank). Non-finite samples
    /// are ignored.
    pub fn from_distribution(values: &[f64], keys: &[u8]) -> Result<Self, TableError> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return Err(TableError::Empty);
        }
        sorted.sort_by(f64::total_cmp);

        let last = sorted.len() - 1;
        let mut boundaries = BTreeMap::new();
        for &key in keys {
            if key > 100 {
                return Err(TableError::KeyOutOfRange(key));
            }
            let rank = (f64::from(100 - key) / 100.0 * last as f64).round() as usize;
            boundaries.insert(key, sorted[rank.min(last)]);
        }
        Self::new(boundaries)
    }

    /// Boundary stored under `key`.
    pub fn boundary(&self, key: u8) -> Option<f64> {
        self.boundaries.get(&key).copied()
    }

    /// Returns `Some(value >= boundary(key))`, or `None` for an unknown key.
    pub fn is_above(&self, key: u8, value: f64) -> Option<bool> {
        self.boundary(key).map(|b| value >= b)
    }

    /// Index of the band containing `value`: the number of boundaries `<= value`.
    ///
    /// Ranges over `0..=self.len()`.
    pub fn band_index(&self, value: f64) -> usize {
        self.boundaries.values().filter(|&&b| b <= value).count()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.boundaries.keys().copied()
    }

    /// `(key, boundary)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.boundaries.iter().map(|(&k, &v)| (k, v))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Always `false` for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }
}

impl TryFrom<BTreeMap<u8, f64>> for QuantileTable {
    type Error = TableError;

    fn try_from(boundaries: BTreeMap<u8, f64>) -> Result<Self, Self::Error> {
        Self::new(boundaries)
    }
}

impl From<QuantileTable> for BTreeMap<u8, f64> {
    fn from(table: QuantileTable) -> Self {
        table.boundaries
    }
}
