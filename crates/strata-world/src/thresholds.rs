//! Canonical band tables for the classified world layers.
//!
//! Each constructor takes the lower bound of every band after the first, the
//! way generators report them, and produces a table whose last band is open.

use std::collections::BTreeMap;

use strata_grid::{PERCENTILE_KEYS, QuantileTable, TableError, ThresholdTable};

/// Elevation layout, lowest band first.
pub const ELEVATION_BANDS: &[&str] = &["sea", "plain", "hill", "mountain"];
/// Elevation layout for worlds generated without a hill band.
pub const ELEVATION_BANDS_NO_HILL: &[&str] = &["sea", "plain", "mountain"];
/// Temperature layout, coldest first. Labels match `TemperatureBand`.
pub const TEMPERATURE_BANDS: &[&str] = &[
    "polar",
    "alpine",
    "boreal",
    "cool",
    "warm",
    "subtropical",
    "tropical",
];
/// Layout shared by permeability and precipitation.
pub const LEVEL_BANDS: &[&str] = &["low", "med", "high"];
/// Stream size layout.
pub const WATERMAP_BANDS: &[&str] = &["none", "creek", "river", "main river"];

fn banded(labels: &[&str], bounds: &[f64]) -> Result<ThresholdTable, TableError> {
    debug_assert_eq!(labels.len(), bounds.len() + 1);
    let uppers = bounds.iter().copied().map(Some).chain(std::iter::once(None));
    ThresholdTable::from_pairs(labels.iter().copied().zip(uppers))
}

/// `sea < sea_level <= plain < plain_top <= hill < hill_top <= mountain`.
///
/// Without `hill_top` the table has no hill band and mountains start at
/// `plain_top`.
pub fn elevation(
    sea_level: f64,
    plain_top: f64,
    hill_top: Option<f64>,
) -> Result<ThresholdTable, TableError> {
    match hill_top {
        Some(hill_top) => banded(ELEVATION_BANDS, &[sea_level, plain_top, hill_top]),
        None => banded(ELEVATION_BANDS_NO_HILL, &[sea_level, plain_top]),
    }
}

/// Six ascending boundaries between the seven temperature bands.
pub fn temperature(bounds: [f64; 6]) -> Result<ThresholdTable, TableError> {
    banded(TEMPERATURE_BANDS, &bounds)
}

/// Permeability levels: `low < low_top <= med < med_top <= high`.
pub fn permeability(low: f64, med: f64) -> Result<ThresholdTable, TableError> {
    banded(LEVEL_BANDS, &[low, med])
}

/// Precipitation levels, same layout as [`permeability`].
pub fn precipitation(low: f64, med: f64) -> Result<ThresholdTable, TableError> {
    banded(LEVEL_BANDS, &[low, med])
}

/// Flow thresholds at which a cell starts to hold a creek, a river and a
/// main river.
pub fn watermap(creek: f64, river: f64, main_river: f64) -> Result<ThresholdTable, TableError> {
    banded(WATERMAP_BANDS, &[creek, river, main_river])
}

/// Humidity quantiles for the seven canonical percentile keys, in key order
/// (12, 25, ..., 87).
pub fn humidity(values: [f64; 7]) -> Result<QuantileTable, TableError> {
    QuantileTable::new(PERCENTILE_KEYS.into_iter().zip(values).collect::<BTreeMap<_, _>>())
}

#[cfg(test)]
mod tests {
    use strata_biome::TemperatureBand;

    use super::*;

    #[test]
    fn test_temperature_labels_match_bands() {
        let labels: Vec<_> = TemperatureBand::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels, TEMPERATURE_BANDS);
    }

    #[test]
    fn test_elevation_layouts() {
        let with_hill = elevation(1.0, 5.0, Some(8.0)).unwrap();
        assert_eq!(with_hill.labels().collect::<Vec<_>>(), ELEVATION_BANDS);
        assert_eq!(with_hill.boundary("hill"), Some(8.0));

        let without = elevation(1.0, 5.0, None).unwrap();
        assert_eq!(without.labels().collect::<Vec<_>>(), ELEVATION_BANDS_NO_HILL);
        assert_eq!(without.band(6.0), "mountain");
    }

    #[test]
    fn test_watermap_bands() {
        let table = watermap(0.1, 0.5, 2.0).unwrap();
        assert_eq!(table.band(0.05), "none");
        assert_eq!(table.band(0.1), "creek");
        assert_eq!(table.band(0.5), "river");
        assert_eq!(table.band(2.0), "main river");
    }

    #[test]
    fn test_temperature_rejects_unordered() {
        assert!(matches!(
            temperature([0.1, 0.2, 0.3, 0.3, 0.5, 0.6]),
            Err(TableError::NotIncreasing { .. })
        ));
        assert_eq!(temperature([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap().len(), 7);
    }

    #[test]
    fn test_humidity_keys() {
        let table = humidity([0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3]).unwrap();
        assert_eq!(table.boundary(12), Some(0.9));
        assert_eq!(table.boundary(87), Some(0.3));
    }
}
